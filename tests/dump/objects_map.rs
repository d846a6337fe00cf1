//! Integration tests for identity-map dumps
//!
//! Tests discovery order, canonical bodies and the empty-registry token.

use std::rc::Rc;

use vardump_dump::{Dump, DumpConfig, Dumper, ValueSnapshot};
use vardump_foundation::{Closure, Dict, Record, Value};

fn map(value: impl Into<Value>, depth: usize) -> String {
    Dumper::new(value).as_identity_map(depth, false).unwrap()
}

#[test]
fn scalars_and_containers_give_empty_sequence() {
    assert_eq!(map(1, 50), "[]");
    assert_eq!(map(vec![1, 2], 50), "[]");
    assert_eq!(map(Dict::new().insert("a", vec!["b"]), 50), "[]");
}

#[test]
fn depth_limit_leaves_registry_empty() {
    let v = Value::from(vec![Value::Int(1), Value::from(Vec::<i32>::new())]);
    assert_eq!(map(v, 0), "[]");
}

#[test]
fn flat_object() {
    let user = Record::new("stdClass");
    user.set("id", 1);
    assert_eq!(map(user, 50), r#"{"stdClass#1":{"public $id":1}}"#);
}

#[test]
fn nested_object_follows_parent() {
    let user = Record::new("stdClass");
    user.set("id", 1);
    let decorated = Record::new("stdClass");
    decorated.set("id", 1);
    decorated.set("name", "Name");
    decorated.set("originalUser", Value::from(Rc::clone(&user)));
    assert_eq!(
        map(decorated, 50),
        r#"{"stdClass#1":{"public $id":1,"public $name":"Name","public $originalUser":"object@stdClass#2"},"stdClass#2":{"public $id":1}}"#
    );
}

#[test]
fn closure_inside_object() {
    let holder = Record::new("stdClass");
    holder.set("closure", Value::from(Closure::new("fn () => true")));
    assert_eq!(
        map(holder, 50),
        r#"{"stdClass#1":{"public $closure":"fn () => true"},"Closure#2":"fn () => true"}"#
    );
}

#[test]
fn object_inside_container_is_registered() {
    let object = Record::new("stdClass");
    object.set("id", 7);
    let v = Value::from(vec![Value::from(vec![Value::from(object)])]);
    assert_eq!(map(v, 3), r#"{"stdClass#1":{"public $id":7}}"#);
}

#[test]
fn stateless_and_stateful_bodies() {
    let stateless = Record::new("stdClass");
    let stateful = Record::new("stdClass");
    stateful.set("id", 1);
    let v = Value::from(vec![
        Value::from(stateless),
        Value::from(vec![Value::from(stateful)]),
    ]);
    assert_eq!(
        map(v, 3),
        r#"{"stdClass#1":{},"stdClass#2":{"public $id":1}}"#
    );
}

#[test]
fn object_beyond_depth_is_not_registered() {
    let object1 = Record::new("stdClass");
    object1.set("id", 1);
    let object2 = Record::new("stdClass");
    object2.set("id", 2);
    let v = Value::from(vec![
        Value::from(object1),
        Value::from(vec![Value::from(vec![Value::from(object2)])]),
    ]);
    assert_eq!(map(v, 2), r#"{"stdClass#1":{"public $id":1}}"#);
}

#[test]
fn out_of_depth_object_is_not_cached() {
    let object1 = Record::new("stdClass");
    let object2 = Record::new("stdClass");
    let dumper = Dumper::new(vec![
        Value::from(object1),
        Value::from(vec![Value::from(vec![Value::from(object2)])]),
    ]);
    assert_eq!(
        dumper.as_inline(2, false).unwrap(),
        r#"["object@stdClass#1",["array (1 item) [...]"]]"#
    );
    assert_eq!(dumper.as_identity_map(2, false).unwrap(), r#"{"stdClass#1":{}}"#);
}

#[test]
fn cut_off_identity_expanded_later_at_shallower_depth() {
    let object = Record::new("stdClass");
    object.set("id", 1);
    let o = Value::from(object);
    let dumper = Dumper::new(vec![Value::from(vec![o.clone()]), o]);
    assert_eq!(
        dumper.as_inline(2, false).unwrap(),
        r#"[["stdClass#1 (...)"],"object@stdClass#1"]"#
    );
    assert_eq!(
        dumper.as_identity_map(2, false).unwrap(),
        r#"{"stdClass#1":{"public $id":1}}"#
    );
}

#[test]
fn first_occurrence_is_canonical() {
    let shared = Record::new("Shared");
    shared.set("v", 1);
    let a = Record::new("A");
    a.set("s", Value::from(Rc::clone(&shared)));
    let b = Record::new("B");
    b.set("s", Value::from(Rc::clone(&shared)));
    let v = Value::from(vec![Value::from(a), Value::from(b)]);
    assert_eq!(
        map(v, 10),
        r#"{"A#1":{"public $s":"object@Shared#2"},"Shared#2":{"public $v":1},"B#3":{"public $s":"object@Shared#2"}}"#
    );
}

#[test]
fn both_forms_from_one_dump() {
    let o = Record::new("stdClass");
    o.set("id", 1);
    let dump = Dump::capture(&Value::from(vec![Value::from(o)]), &DumpConfig::default());
    assert!(matches!(dump.root(), ValueSnapshot::Sequence(_)));
    assert_eq!(dump.to_inline(false).unwrap(), r#"["object@stdClass#1"]"#);
    assert_eq!(
        dump.to_identity_map(false).unwrap(),
        r#"{"stdClass#1":{"public $id":1}}"#
    );
}

#[test]
fn pretty_map() {
    let o = Record::new("stdClass");
    o.set("id", 1);
    let text = Dumper::new(o).as_identity_map(5, true).unwrap();
    assert_eq!(
        text,
        "{\n    \"stdClass#1\": {\n        \"public $id\": 1\n    }\n}"
    );
}
