//! Integration tests for callable dumps
//!
//! Tests source extraction, parameter-type qualification and identity.

use vardump_dump::Dumper;
use vardump_foundation::{Closure, ImportScope, Record, Value};

fn scope() -> ImportScope {
    ImportScope::new()
        .in_namespace("Yiisoft\\Yii\\Debug\\Tests\\Unit")
        .import("Yiisoft\\Yii\\Debug\\Dumper")
        .import_as("Yiisoft\\Yii\\Debug", "D")
}

fn inline(value: impl Into<Value>) -> String {
    Dumper::new(value).as_inline(50, false).unwrap()
}

#[test]
fn short_functions() {
    assert_eq!(inline(Closure::new("fn () => 1")), r#"{"Closure#1":"fn () => 1"}"#);
    assert_eq!(
        inline(Closure::new("static fn () => 1")),
        r#"{"Closure#1":"static fn () => 1"}"#
    );
}

#[test]
fn multi_line_function() {
    assert_eq!(
        inline(Closure::new("function () {\n    return 1;\n}")),
        r#"{"Closure#1":"function () {\n    return 1;\n}"}"#
    );
}

#[test]
fn closure_in_array() {
    assert_eq!(
        inline(vec![Value::from(Closure::new("fn () => new \\DateTimeZone('')"))]),
        r#"[{"Closure#1":"fn () => new \\DateTimeZone('')"}]"#
    );
}

#[test]
fn imported_class_name() {
    let c = Closure::declare("fn (Dumper $date) => new \\DateTimeZone('')").with_scope(scope());
    assert_eq!(
        inline(std::rc::Rc::new(c)),
        r#"{"Closure#1":"fn (\\Yiisoft\\Yii\\Debug\\Dumper $date) => new \\DateTimeZone('')"}"#
    );
}

#[test]
fn namespace_alias() {
    let c = Closure::declare("fn (D\\Dumper $date) => new \\DateTimeZone('')").with_scope(scope());
    assert_eq!(
        inline(std::rc::Rc::new(c)),
        r#"{"Closure#1":"fn (\\Yiisoft\\Yii\\Debug\\Dumper $date) => new \\DateTimeZone('')"}"#
    );
}

#[test]
fn unimported_class_resolves_in_declaring_namespace() {
    let c = Closure::declare("fn (Foo $x) => 1")
        .with_scope(ImportScope::new().in_namespace("App\\Http"));
    assert_eq!(
        inline(std::rc::Rc::new(c)),
        r#"{"Closure#1":"fn (\\App\\Http\\Foo $x) => 1"}"#
    );
}

#[test]
fn null_coalescing_body() {
    assert_eq!(
        inline(Closure::new("fn () => $_ENV['var'] ?? null")),
        r#"{"Closure#1":"fn () => $_ENV['var'] ?? null"}"#
    );
}

#[test]
fn closure_in_property() {
    let o = Record::new("stdClass");
    o.set("a", Value::from(Closure::new("fn () => 1")));
    assert_eq!(
        inline(o),
        r#"{"stdClass#1":{"public $a":{"Closure#2":"fn () => 1"}}}"#
    );
}

#[test]
fn identical_text_distinct_identities() {
    let v = Value::from(vec![
        Value::from(Closure::new("fn () => 1")),
        Value::from(Closure::new("fn () => 1")),
    ]);
    assert_eq!(
        inline(v.clone()),
        r#"[{"Closure#1":"fn () => 1"},{"Closure#2":"fn () => 1"}]"#
    );
    assert_eq!(
        Dumper::new(v).as_identity_map(50, false).unwrap(),
        r#"{"Closure#1":"fn () => 1","Closure#2":"fn () => 1"}"#
    );
}

#[test]
fn repeated_closure_renders_in_place_every_time() {
    let c = Value::from(Closure::new("fn () => 1"));
    assert_eq!(
        inline(vec![c.clone(), c]),
        r#"[{"Closure#1":"fn () => 1"},{"Closure#1":"fn () => 1"}]"#
    );
}

#[test]
fn callables_ignore_depth() {
    let v = Value::from(vec![Value::from(Closure::new("fn () => 1"))]);
    assert_eq!(
        Dumper::new(v).as_inline(1, false).unwrap(),
        r#"[{"Closure#1":"fn () => 1"}]"#
    );
}

#[test]
fn excluded_callable_type() {
    let c = Closure::declare("fn () => 1").with_type_name("Handler");
    let config = vardump_dump::DumpConfig::default().exclude("Handler");
    let text = vardump_dump::dump_inline(&Value::from(std::rc::Rc::new(c)), &config).unwrap();
    assert_eq!(text, r#""Handler#1 (...)""#);
}
