//! Classification tags for values.

use std::fmt;

/// Classification tag for a value.
///
/// Every [`crate::Value`] maps to exactly one kind. Text and binary strings
/// share the `String` kind.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The null value.
    Null,
    /// Boolean.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Text or binary string.
    String,
    /// Ordered sequence.
    Sequence,
    /// Key-ordered mapping.
    Mapping,
    /// Record with named, visibility-tagged fields.
    Composite,
    /// Function-like value.
    Callable,
    /// External resource.
    Handle,
}

impl Kind {
    /// Returns true for kinds rendered directly without depth or identity interaction.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool | Self::Int | Self::Float | Self::String
        )
    }

    /// Returns true for kinds whose elements count against the depth budget.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Sequence | Self::Mapping)
    }

    /// Returns true for kinds that carry a per-dump identity token.
    #[must_use]
    pub const fn has_identity(self) -> bool {
        matches!(self, Self::Composite | Self::Callable)
    }

    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "array",
            Self::Mapping => "map",
            Self::Composite => "object",
            Self::Callable => "callable",
            Self::Handle => "resource",
        }
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
