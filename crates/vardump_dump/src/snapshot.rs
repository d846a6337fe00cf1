//! Rendered snapshot tree.
//!
//! A [`ValueSnapshot`] is what the renderer produces for one value. It holds
//! no references into the original graph, so it can outlive the values it
//! describes.

use std::fmt;
use std::rc::Rc;

use vardump_foundation::{Key, Visibility};

/// Per-dump identity of a composite or callable.
///
/// Displays as `Type#token`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Token assigned at first encounter, starting from 1.
    pub token: u64,
    /// Type name of the identified value.
    pub type_name: Rc<str>,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_name, self.token)
    }
}

/// Scalar payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// UTF-8 text.
    Str(Rc<str>),
    /// Binary content, shown with lossy UTF-8 decoding.
    Bytes(Rc<[u8]>),
}

/// Which kind of container a [`ValueSnapshot::Summary`] replaces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    /// Ordered sequence.
    Sequence,
    /// Mapping.
    Mapping,
}

/// Why a [`ValueSnapshot::Reference`] stands in for a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RefStyle {
    /// Points at a canonical snapshot in the registry.
    Fresh,
    /// The depth budget ran out before this value could be expanded.
    DepthExceeded,
    /// The value's type is excluded from expansion.
    Excluded,
    /// The value is an ancestor on the current descent path.
    Cycle,
}

/// One field of a rendered composite.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSnapshot {
    /// Field name.
    pub name: Rc<str>,
    /// Field visibility.
    pub visibility: Visibility,
    /// Rendered field value.
    pub value: ValueSnapshot,
}

/// Metadata shown for an open handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandleMeta {
    /// A read timed out.
    pub timed_out: bool,
    /// Blocking mode.
    pub blocked: bool,
    /// End of stream reached.
    pub eof: bool,
    /// Transport kind.
    pub wrapper_type: &'static str,
    /// Medium kind.
    pub stream_type: &'static str,
    /// Open mode.
    pub mode: Rc<str>,
    /// Buffered bytes not yet consumed.
    pub unread_bytes: usize,
    /// Whether the handle supports seeking.
    pub seekable: bool,
    /// Addressable location, when the handle has one.
    pub uri: Option<Rc<str>>,
}

/// Snapshot of an external handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandleSnapshot {
    /// Handle is open.
    Open(HandleMeta),
    /// Handle has been closed.
    Closed,
}

/// Rendered value.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueSnapshot {
    /// Scalar.
    Scalar(Scalar),
    /// Ordered elements.
    Sequence(Vec<ValueSnapshot>),
    /// Entries in original order, keys in original form.
    Mapping(Vec<(Key, ValueSnapshot)>),
    /// Expanded composite. Stateless composites have no fields.
    Composite {
        /// Identity of the composite.
        identity: Identity,
        /// Fields in declaration order.
        fields: Vec<FieldSnapshot>,
    },
    /// Callable with its declaration source.
    Callable {
        /// Identity of the callable.
        identity: Identity,
        /// Source text with parameter types fully qualified.
        source: Rc<str>,
    },
    /// External handle.
    Handle(HandleSnapshot),
    /// Container cut off by the depth budget.
    Summary {
        /// Kind of the replaced container.
        kind: ContainerKind,
        /// Number of elements or entries.
        count: usize,
    },
    /// Stand-in for an identity rendered elsewhere or intentionally skipped.
    Reference {
        /// Referenced identity.
        identity: Identity,
        /// Why this is a reference.
        style: RefStyle,
    },
}

impl ValueSnapshot {
    /// Returns the identity carried by composites, callables and references.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Composite { identity, .. }
            | Self::Callable { identity, .. }
            | Self::Reference { identity, .. } => Some(identity),
            _ => None,
        }
    }

    /// Returns true for a composite with no fields.
    #[must_use]
    pub fn is_stateless(&self) -> bool {
        matches!(self, Self::Composite { fields, .. } if fields.is_empty())
    }
}
