//! Event collector tests

use vardump::collect::{BufferTarget, Collector, Dispatcher, DumpTarget, EventCollector};
use vardump::dump::DumpConfig;
use vardump::foundation::{ErrorKind, Record, Value};

struct Passthrough;

impl Dispatcher for Passthrough {
    fn dispatch(&mut self, event: Value) -> Value {
        event
    }
}

#[test]
fn events_are_recorded_in_dispatch_order() {
    let mut dispatcher = EventCollector::new(Passthrough);
    for name in ["Started", "Saved", "Finished"] {
        dispatcher.dispatch(Value::from(Record::new(name)));
    }
    let names: Vec<_> = dispatcher
        .events()
        .iter()
        .map(|e| {
            e.as_dict()
                .and_then(|d| d.get(&"event".into()))
                .map(|v| v.type_name().to_string())
                .unwrap()
        })
        .collect();
    assert_eq!(names, ["Started", "Saved", "Finished"]);
}

#[test]
fn export_without_target_is_not_configured() {
    let dispatcher = EventCollector::new(Passthrough);
    assert!(matches!(
        dispatcher.export().unwrap_err().kind,
        ErrorKind::NotConfigured {
            component: "EventCollector"
        }
    ));
}

#[test]
fn export_with_no_events_sends_empty_payload() {
    let buffer = BufferTarget::shared();
    let mut dispatcher = EventCollector::new(Passthrough);
    dispatcher.set_target(buffer.clone());
    dispatcher.export().unwrap();
    assert_eq!(buffer.borrow().payloads()[0].as_seq().map(|s| s.len()), Some(0));
}

#[test]
fn dumped_events_reflect_state_at_export() {
    let target = DumpTarget::shared(DumpConfig::default());
    let mut dispatcher = EventCollector::new(Passthrough);
    dispatcher.set_target(target.clone());

    let event = Record::new("Saved");
    event.set("id", 7);
    dispatcher.dispatch(Value::from(event.clone()));
    event.set("handled", true);
    dispatcher.export().unwrap();
    event.set("handled", false);

    let target = target.borrow();
    let record = &target.records()[0];
    assert!(record.inline.starts_with(r#"[{"event":"object@Saved#1","time":"#));
    assert_eq!(
        record.objects,
        r#"{"Saved#1":{"public $id":7,"public $handled":true}}"#
    );
}
