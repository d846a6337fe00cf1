//! Integration tests for composites and closures
//!
//! Tests descriptors, field slots, dynamic fields, the inspection override and
//! import scopes.

use std::rc::Rc;

use vardump_foundation::{
    Closure, Composite, ImportScope, Record, TypeDescriptor, Value, Visibility,
};

fn three_properties() -> Rc<TypeDescriptor> {
    Rc::new(
        TypeDescriptor::new("ThreeProperties")
            .public("first")
            .protected("second")
            .private("third"),
    )
}

// =============================================================================
// Descriptors
// =============================================================================

#[test]
fn descriptor_keeps_declaration_order() {
    let desc = three_properties();
    let names: Vec<&str> = desc.fields.iter().map(|f| &*f.name).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    assert_eq!(desc.fields[1].visibility, Visibility::Protected);
    assert_eq!(desc.position("third"), Some(2));
    assert_eq!(desc.position("fourth"), None);
}

#[test]
fn records_share_descriptor() {
    let desc = three_properties();
    let a = Record::with_descriptor(Rc::clone(&desc));
    let b = Record::with_descriptor(Rc::clone(&desc));
    assert!(Rc::ptr_eq(&a.descriptor(), &b.descriptor()));
}

// =============================================================================
// Fields
// =============================================================================

#[test]
fn declared_fields_start_null() {
    let r = Record::with_descriptor(three_properties());
    assert_eq!(r.field(0), Value::Null);
    assert_eq!(r.field(9), Value::Null);
}

#[test]
fn set_routes_declared_and_dynamic() {
    let r = Record::with_descriptor(three_properties());
    r.set("second", "two");
    r.set("extra", 1);
    assert_eq!(r.get("second"), Some(Value::from("two")));
    assert_eq!(r.dynamic_fields().len(), 1);
    assert_eq!(&*r.dynamic_fields()[0].0, "extra");
}

#[test]
fn records_can_form_cycles() {
    let parent = Record::new("Node");
    let child = Record::new("Node");
    parent.set("child", Value::from(Rc::clone(&child)));
    child.set("parent", Value::from(Rc::clone(&parent)));
    assert_eq!(child.get("parent"), Some(Value::from(Rc::clone(&parent))));
    child.set("parent", Value::Null);
}

struct Masked;

impl Composite for Masked {
    fn descriptor(&self) -> Rc<TypeDescriptor> {
        Rc::new(TypeDescriptor::new("Masked").private("secret"))
    }

    fn field(&self, _index: usize) -> Value {
        Value::from("hunter2")
    }

    fn debug_fields(&self) -> Option<Vec<(Rc<str>, Value)>> {
        Some(vec![("secret".into(), Value::from("***"))])
    }
}

#[test]
fn inspection_override_is_available() {
    let m = Masked;
    assert_eq!(m.field(0), Value::from("hunter2"));
    let fields = m.debug_fields().unwrap();
    assert_eq!(fields[0].1, Value::from("***"));
    assert!(m.dynamic_fields().is_empty());
}

// =============================================================================
// Closures
// =============================================================================

#[test]
fn closure_builders() {
    let scope = ImportScope::new()
        .in_namespace("App\\Http")
        .import("App\\Model\\User")
        .import_as("Psr\\Log", "Log");
    let c = Closure::declare("fn (User $u) => $u").with_scope(scope);
    assert_eq!(c.type_name(), "Closure");
    assert_eq!(c.scope().resolve("User"), Some("App\\Model\\User"));
    assert_eq!(c.scope().resolve("Log"), Some("Psr\\Log"));
    assert_eq!(c.scope().resolve("Other"), None);
    assert_eq!(c.scope().namespace.as_deref(), Some("App\\Http"));
}

#[test]
fn closure_source_is_verbatim() {
    let src = "static function () {\n    return 1;\n}";
    assert_eq!(Closure::new(src).source(), src);
}
