//! Value classification.
//!
//! Turns a [`Value`] into a [`Classified`] view the renderer can match on
//! without further type checks. Composites are resolved to their effective
//! field list here: the inspection override wins, otherwise declared fields
//! in declaration order followed by dynamic public fields.

use std::rc::Rc;

use vardump_foundation::{Closure, Composite, Dict, Handle, Kind, Seq, Value, Visibility};

use crate::snapshot::Scalar;

/// A field as seen by the classifier.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldView {
    /// Field name.
    pub name: Rc<str>,
    /// Field visibility.
    pub visibility: Visibility,
    /// Current value.
    pub value: Value,
}

/// A composite resolved to its type name and effective fields.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeView {
    /// Type name.
    pub type_name: Rc<str>,
    /// Effective fields in order.
    pub fields: Vec<FieldView>,
}

impl CompositeView {
    /// Resolves the effective fields of a composite.
    #[must_use]
    pub fn of(obj: &dyn Composite) -> Self {
        let descriptor = obj.descriptor();
        let type_name = Rc::clone(&descriptor.name);

        if let Some(overridden) = obj.debug_fields() {
            let fields = overridden
                .into_iter()
                .map(|(name, value)| FieldView {
                    name,
                    visibility: Visibility::Public,
                    value,
                })
                .collect();
            return Self { type_name, fields };
        }

        let mut fields: Vec<FieldView> = descriptor
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| FieldView {
                name: Rc::clone(&field.name),
                visibility: field.visibility,
                value: obj.field(index),
            })
            .collect();
        fields.extend(
            obj.dynamic_fields()
                .into_iter()
                .map(|(name, value)| FieldView {
                    name,
                    visibility: Visibility::Public,
                    value,
                }),
        );
        Self { type_name, fields }
    }

    /// Returns true if the composite has no fields at all.
    ///
    /// Field presence matters, not field value: a composite whose fields are
    /// all null is still stateful.
    #[must_use]
    pub fn is_stateless(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Classification of a value.
pub enum Classified<'a> {
    /// Null, boolean, number or string.
    Scalar(Scalar),
    /// Ordered sequence.
    Sequence(&'a Seq),
    /// Mapping.
    Mapping(&'a Dict),
    /// Composite with its resolved fields.
    Composite {
        /// The composite itself, for identity.
        object: &'a Rc<dyn Composite>,
        /// Type name and effective fields.
        view: CompositeView,
    },
    /// Callable.
    Callable(&'a Rc<Closure>),
    /// External handle.
    Handle(&'a Rc<Handle>),
}

impl Classified<'_> {
    /// Returns the classification tag.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Scalar(Scalar::Null) => Kind::Null,
            Self::Scalar(Scalar::Bool(_)) => Kind::Bool,
            Self::Scalar(Scalar::Int(_)) => Kind::Int,
            Self::Scalar(Scalar::Float(_)) => Kind::Float,
            Self::Scalar(Scalar::Str(_) | Scalar::Bytes(_)) => Kind::String,
            Self::Sequence(_) => Kind::Sequence,
            Self::Mapping(_) => Kind::Mapping,
            Self::Composite { .. } => Kind::Composite,
            Self::Callable(_) => Kind::Callable,
            Self::Handle(_) => Kind::Handle,
        }
    }

    /// Returns the element or entry count of a container.
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::Sequence(seq) => Some(seq.len()),
            Self::Mapping(dict) => Some(dict.len()),
            _ => None,
        }
    }
}

/// Classifies a value. Has no side effects.
#[must_use]
pub fn classify(value: &Value) -> Classified<'_> {
    match value {
        Value::Null => Classified::Scalar(Scalar::Null),
        Value::Bool(b) => Classified::Scalar(Scalar::Bool(*b)),
        Value::Int(n) => Classified::Scalar(Scalar::Int(*n)),
        Value::Float(n) => Classified::Scalar(Scalar::Float(*n)),
        Value::String(s) => Classified::Scalar(Scalar::Str(Rc::clone(s))),
        Value::Bytes(b) => Classified::Scalar(Scalar::Bytes(Rc::clone(b))),
        Value::Seq(seq) => Classified::Sequence(seq),
        Value::Dict(dict) => Classified::Mapping(dict),
        Value::Object(obj) => Classified::Composite {
            object: obj,
            view: CompositeView::of(obj.as_ref()),
        },
        Value::Closure(c) => Classified::Callable(c),
        Value::Handle(h) => Classified::Handle(h),
    }
}
