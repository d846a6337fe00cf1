//! Log collector tests

use vardump::collect::{Collector, DumpTarget, Level, LogCollector, Logger, TracingLogger};
use vardump::dump::DumpConfig;
use vardump::foundation::{Dict, ErrorKind, Record, Value};

use crate::init_tracing;

#[test]
fn every_level_is_recorded_with_its_name() {
    init_tracing();
    let mut logger = LogCollector::new(TracingLogger);
    logger.emergency("a", Dict::new());
    logger.alert("b", Dict::new());
    logger.critical("c", Dict::new());
    logger.error("d", Dict::new());
    logger.warning("e", Dict::new());
    logger.notice("f", Dict::new());
    logger.info("g", Dict::new());
    logger.debug("h", Dict::new());
    logger.log(Level::Notice, "i", Dict::new());

    let levels: Vec<_> = logger
        .messages()
        .iter()
        .map(|m| {
            m.as_dict()
                .and_then(|d| d.get(&"level".into()))
                .and_then(Value::as_str)
                .unwrap()
                .to_string()
        })
        .collect();
    assert_eq!(
        levels,
        [
            "emergency", "alert", "critical", "error", "warning", "notice", "info", "debug",
            "notice"
        ]
    );
}

#[test]
fn export_without_target_is_not_configured() {
    let logger = LogCollector::new(TracingLogger);
    let err = logger.export().unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::NotConfigured {
            component: "LogCollector"
        }
    ));
}

#[test]
fn exported_messages_are_dumped() {
    init_tracing();
    let target = DumpTarget::shared(DumpConfig::default());
    let mut logger = LogCollector::new(TracingLogger);
    logger.set_target(target.clone());

    let user = Record::new("User");
    user.set("name", "ada");
    logger.info("login", Dict::new().insert("user", user.clone()));
    logger.export().unwrap();

    let target = target.borrow();
    let record = &target.records()[0];
    assert!(record.inline.starts_with(r#"[{"time":"#));
    assert!(record.inline.contains(r#""level":"info","message":"login","context":{"user":"object@User#1"}"#));
    assert_eq!(record.objects, r#"{"User#1":{"public $name":"ada"}}"#);
}

#[test]
fn dumped_record_is_a_snapshot() {
    let target = DumpTarget::shared(DumpConfig::default());
    let mut logger = LogCollector::new(TracingLogger);
    logger.set_target(target.clone());

    let user = Record::new("User");
    user.set("name", "ada");
    logger.info("login", Dict::new().insert("user", user.clone()));
    logger.export().unwrap();
    user.set("name", "grace");

    assert_eq!(
        target.borrow().records()[0].objects,
        r#"{"User#1":{"public $name":"ada"}}"#
    );
}
