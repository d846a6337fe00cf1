//! Core value type for every dumpable graph.

use std::fmt;
use std::rc::Rc;

use crate::closure::Closure;
use crate::collections::{Dict, Seq};
use crate::handle::Handle;
use crate::record::Composite;
use crate::types::Kind;

/// Core value type.
///
/// Values are cheaply cloneable. Composites, closures and handles are shared
/// by reference: cloning the value clones the pointer, so both clones have the
/// same identity. Composites may form cycles.
#[derive(Clone, Default)]
pub enum Value {
    /// The null value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(Rc<str>),
    /// Binary or non-UTF-8 string.
    Bytes(Rc<[u8]>),
    /// Ordered sequence.
    Seq(Seq),
    /// Insertion-ordered mapping.
    Dict(Dict),
    /// Composite record.
    Object(Rc<dyn Composite>),
    /// Callable.
    Closure(Rc<Closure>),
    /// External resource.
    Handle(Rc<Handle>),
}

impl Value {
    /// Returns the classification tag of this value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Float(_) => Kind::Float,
            Self::String(_) | Self::Bytes(_) => Kind::String,
            Self::Seq(_) => Kind::Sequence,
            Self::Dict(_) => Kind::Mapping,
            Self::Object(_) => Kind::Composite,
            Self::Closure(_) => Kind::Callable,
            Self::Handle(_) => Kind::Handle,
        }
    }

    /// Returns the type name: the declared name for composites and callables,
    /// the kind name otherwise.
    #[must_use]
    pub fn type_name(&self) -> Rc<str> {
        match self {
            Self::Object(obj) => Rc::clone(&obj.descriptor().name),
            Self::Closure(c) => c.type_name().into(),
            other => other.kind().name().into(),
        }
    }

    /// Wraps a composite.
    #[must_use]
    pub fn object<C: Composite + 'static>(obj: Rc<C>) -> Self {
        Self::Object(obj)
    }

    /// Creates a binary string.
    #[must_use]
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self::Bytes(bytes.into())
    }

    /// Returns true if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a sequence reference.
    #[must_use]
    pub const fn as_seq(&self) -> Option<&Seq> {
        match self {
            Self::Seq(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract a mapping reference.
    #[must_use]
    pub const fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(m) => Some(m),
            _ => None,
        }
    }

    /// Attempts to extract a composite reference.
    #[must_use]
    pub fn as_object(&self) -> Option<&Rc<dyn Composite>> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Attempts to extract a handle reference.
    #[must_use]
    pub fn as_handle(&self) -> Option<&Rc<Handle>> {
        match self {
            Self::Handle(h) => Some(h),
            _ => None,
        }
    }
}

// Scalars and containers compare structurally; shared values compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => a == b,
            (Self::Dict(a), Self::Dict(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            (Self::Closure(a), Self::Closure(b)) => Rc::ptr_eq(a, b),
            (Self::Handle(a), Self::Handle(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => write!(f, "b{:?}", String::from_utf8_lossy(b)),
            Self::Seq(v) => write!(f, "{v:?}"),
            Self::Dict(m) => write!(f, "{m:?}"),
            Self::Object(obj) => write!(f, "<object {}>", obj.descriptor().name),
            Self::Closure(c) => write!(f, "{c:?}"),
            Self::Handle(h) => write!(f, "{h:?}"),
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self {
        Self::String(s)
    }
}

impl From<Seq> for Value {
    fn from(v: Seq) -> Self {
        Self::Seq(v)
    }
}

impl From<Dict> for Value {
    fn from(m: Dict) -> Self {
        Self::Dict(m)
    }
}

impl From<Rc<Closure>> for Value {
    fn from(c: Rc<Closure>) -> Self {
        Self::Closure(c)
    }
}

impl From<Rc<Handle>> for Value {
    fn from(h: Rc<Handle>) -> Self {
        Self::Handle(h)
    }
}

impl From<Rc<crate::record::Record>> for Value {
    fn from(r: Rc<crate::record::Record>) -> Self {
        Self::Object(r)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Seq(v.into_iter().map(Into::into).collect())
    }
}
