//! Integration tests for cyclic graphs
//!
//! Cycles never recurse forever and are broken with a recursion reference.

use std::rc::Rc;

use vardump_dump::{DumpConfig, DumpSession, Dumper, RefStyle, ValueSnapshot};
use vardump_foundation::{Record, Value};

/// Builds `o1 <-> o2` and returns both; the caller breaks the cycle.
fn pair() -> (Rc<Record>, Rc<Record>) {
    let o1 = Record::new("stdClass");
    o1.set("id", "o1");
    let o2 = Record::new("stdClass");
    o2.set("id", "o2");
    o2.set("o1", Value::from(Rc::clone(&o1)));
    o1.set("o2", Value::from(Rc::clone(&o2)));
    (o1, o2)
}

fn unlink(o1: &Record) {
    o1.set("o2", Value::Null);
}

/// Wraps `data` at the bottom of a `depth`-level chain of records.
fn nested(depth: usize, data: Value) -> Value {
    let head = Record::new("stdClass");
    head.set("id", "lvl1");
    let mut level = Rc::clone(&head);
    for i in 2..=depth {
        let next = Record::new("stdClass");
        next.set("id", format!("lvl{i}"));
        level.set(&format!("lvl{i}"), Value::from(Rc::clone(&next)));
        level = next;
    }
    level.set("loop", data);
    Value::from(head)
}

#[test]
fn parent_child_parent() {
    let (o1, _o2) = pair();
    let text = Dumper::new(Rc::clone(&o1)).as_inline(50, false).unwrap();
    assert_eq!(
        text,
        r#"{"stdClass#1":{"public $id":"o1","public $o2":"object@stdClass#2"}}"#
    );
    let map = Dumper::new(Rc::clone(&o1)).as_identity_map(50, false).unwrap();
    assert_eq!(
        map,
        r#"{"stdClass#1":{"public $id":"o1","public $o2":"object@stdClass#2"},"stdClass#2":{"public $id":"o2","public $o1":"object@stdClass#1 (recursion)"}}"#
    );
    unlink(&o1);
}

#[test]
fn self_reference() {
    let o = Record::new("Node");
    o.set("self", Value::from(Rc::clone(&o)));
    let text = Dumper::new(Rc::clone(&o)).as_inline(50, false).unwrap();
    assert_eq!(text, r#"{"Node#1":{"public $self":"object@Node#1 (recursion)"}}"#);
    o.set("self", Value::Null);
}

#[test]
fn nested_loop_terminates_in_both_modes() {
    let (o1, _o2) = pair();
    for depth in [5, 6] {
        let head = nested(depth, Value::from(Rc::clone(&o1)));
        let dumper = Dumper::new(head);
        assert!(dumper.as_inline(depth, false).is_ok());
        assert!(dumper.as_identity_map(depth, false).is_ok());
    }
    let array_loop = nested(6, Value::from(vec![Value::from(Rc::clone(&o1))]));
    assert!(Dumper::new(array_loop).as_identity_map(6, true).is_ok());
    unlink(&o1);
}

#[test]
fn loop_through_array_field() {
    let (o1, _o2) = pair();
    let head = Record::new("stdClass");
    head.set("id", "1");
    head.set(
        "lv12",
        vardump_foundation::Dict::new()
            .insert("id", 2)
            .insert("loop", Value::from(Rc::clone(&o1))),
    );
    let map = Dumper::new(head).as_identity_map(3, false).unwrap();
    assert!(map.starts_with(r#"{"stdClass#1":{"public $id":"1","public $lv12":{"id":2,"loop":"object@stdClass#2"}}"#));
    unlink(&o1);
}

#[test]
fn cycle_reference_only_on_current_path() {
    let (o1, o2) = pair();
    let config = DumpConfig::default();
    let mut session = DumpSession::new(&config);
    session.render(&Value::from(vec![
        Value::from(Rc::clone(&o1)),
        Value::from(Rc::clone(&o2)),
    ]));
    let registry = session.registry();
    assert_eq!(registry.len(), 2);

    let cycles = registry
        .entries()
        .flat_map(|(_, snapshot)| match snapshot {
            ValueSnapshot::Composite { fields, .. } => fields.clone(),
            _ => Vec::new(),
        })
        .filter(|field| {
            matches!(
                field.value,
                ValueSnapshot::Reference {
                    style: RefStyle::Cycle,
                    ..
                }
            )
        })
        .count();
    assert_eq!(cycles, 1);
    unlink(&o1);
}
