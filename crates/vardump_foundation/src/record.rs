//! Composite records with named, visibility-tagged fields.
//!
//! A type describes its fields once through a shared [`TypeDescriptor`];
//! instances expose field values through the [`Composite`] accessor. This
//! replaces runtime reflection: the dumper only ever asks a composite for
//! its descriptor and for the value behind each declared slot.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// Field visibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Visible everywhere.
    Public,
    /// Visible to the type and its descendants.
    Protected,
    /// Visible to the type only.
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Protected => write!(f, "protected"),
            Self::Private => write!(f, "private"),
        }
    }
}

/// A declared field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: Rc<str>,
    /// Field visibility.
    pub visibility: Visibility,
}

impl FieldDescriptor {
    /// Creates a field descriptor.
    #[must_use]
    pub fn new(name: impl Into<Rc<str>>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
        }
    }
}

/// Per-type description: the type name plus its fields in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Type name as shown in dumps.
    pub name: Rc<str>,
    /// Declared fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Creates a descriptor with no declared fields.
    #[must_use]
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder method to declare a public field.
    #[must_use]
    pub fn public(self, name: &str) -> Self {
        self.field(name, Visibility::Public)
    }

    /// Builder method to declare a protected field.
    #[must_use]
    pub fn protected(self, name: &str) -> Self {
        self.field(name, Visibility::Protected)
    }

    /// Builder method to declare a private field.
    #[must_use]
    pub fn private(self, name: &str) -> Self {
        self.field(name, Visibility::Private)
    }

    /// Builder method to declare a field with the given visibility.
    #[must_use]
    pub fn field(mut self, name: &str, visibility: Visibility) -> Self {
        self.fields.push(FieldDescriptor::new(name, visibility));
        self
    }

    /// Returns the slot index of a declared field.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| &*f.name == name)
    }
}

/// A record-like value the dumper can inspect.
///
/// Identity is the allocation: two `Rc`s pointing at the same composite are
/// the same object, two equal-looking composites are not.
pub trait Composite {
    /// Returns the shared descriptor for this value's type.
    fn descriptor(&self) -> Rc<TypeDescriptor>;

    /// Returns the current value of the declared field at `index`.
    ///
    /// Out-of-range indices return [`Value::Null`].
    fn field(&self, index: usize) -> Value;

    /// Returns public fields attached at runtime, after the declared ones.
    fn dynamic_fields(&self) -> Vec<(Rc<str>, Value)> {
        Vec::new()
    }

    /// Inspection override.
    ///
    /// When `Some`, these entries replace declared and dynamic fields in
    /// dumps, and all of them are shown as public.
    fn debug_fields(&self) -> Option<Vec<(Rc<str>, Value)>> {
        None
    }
}

/// Generic composite with a shared descriptor and mutable slots.
///
/// Slots use interior mutability so cyclic graphs can be wired up after
/// construction.
pub struct Record {
    descriptor: Rc<TypeDescriptor>,
    slots: RefCell<Vec<Value>>,
    dynamic: RefCell<Vec<(Rc<str>, Value)>>,
}

impl Record {
    /// Creates an open record with no declared fields.
    ///
    /// The record is stateless until a dynamic field is set.
    #[must_use]
    pub fn new(type_name: &str) -> Rc<Self> {
        Self::with_descriptor(Rc::new(TypeDescriptor::new(type_name)))
    }

    /// Creates a record of the described type with every declared field `Null`.
    #[must_use]
    pub fn with_descriptor(descriptor: Rc<TypeDescriptor>) -> Rc<Self> {
        let slots = vec![Value::Null; descriptor.fields.len()];
        Rc::new(Self {
            descriptor,
            slots: RefCell::new(slots),
            dynamic: RefCell::new(Vec::new()),
        })
    }

    /// Sets a field by name.
    ///
    /// Declared fields are assigned in place; any other name becomes a public
    /// dynamic field, appended on first set and replaced afterwards.
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        if let Some(slot) = self.descriptor.position(name) {
            self.slots.borrow_mut()[slot] = value;
            return;
        }
        let mut dynamic = self.dynamic.borrow_mut();
        match dynamic.iter_mut().find(|(n, _)| &**n == name) {
            Some(entry) => entry.1 = value,
            None => dynamic.push((name.into(), value)),
        }
    }

    /// Gets a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(slot) = self.descriptor.position(name) {
            return self.slots.borrow().get(slot).cloned();
        }
        self.dynamic
            .borrow()
            .iter()
            .find(|(n, _)| &**n == name)
            .map(|(_, v)| v.clone())
    }

    /// Returns the type name.
    #[must_use]
    pub fn type_name(&self) -> Rc<str> {
        Rc::clone(&self.descriptor.name)
    }
}

impl Composite for Record {
    fn descriptor(&self) -> Rc<TypeDescriptor> {
        Rc::clone(&self.descriptor)
    }

    fn field(&self, index: usize) -> Value {
        self.slots.borrow().get(index).cloned().unwrap_or_default()
    }

    fn dynamic_fields(&self) -> Vec<(Rc<str>, Value)> {
        self.dynamic.borrow().clone()
    }
}

impl fmt::Debug for Record {
    // Field values are not printed: records may be cyclic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({})", self.descriptor.name)
    }
}
