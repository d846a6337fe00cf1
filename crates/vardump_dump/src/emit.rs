//! Text emitters.
//!
//! Snapshots are written as JSON through borrowed `Serialize` views, so the
//! same tree can be emitted compact or indented without copying it.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::ser::PrettyFormatter;
use vardump_foundation::{Error, Result};

use crate::registry::IdentityRegistry;
use crate::snapshot::{
    ContainerKind, FieldSnapshot, HandleMeta, HandleSnapshot, Identity, RefStyle, Scalar,
    ValueSnapshot,
};

/// Literal written for a closed handle.
pub const CLOSED_MARKER: &str = "{closed resource}";

const INDENT: &[u8] = b"    ";

/// Inline view: the rendered tree, nested in place.
pub struct InlineView<'a>(pub &'a ValueSnapshot);

/// Map view: every canonical snapshot keyed by identity, in discovery order.
pub struct ObjectMapView<'a>(pub &'a IdentityRegistry);

/// Serializes a view to text.
///
/// # Errors
///
/// Returns a serialization error if `serde_json` fails.
pub fn to_text(view: &impl Serialize, pretty: bool) -> Result<String> {
    if !pretty {
        return serde_json::to_string(view).map_err(|e| Error::serialization(e.to_string()));
    }
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    view.serialize(&mut ser)
        .map_err(|e| Error::serialization(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| Error::serialization(e.to_string()))
}

/// Text of a depth summary, e.g. `array (2 items) [...]`.
#[must_use]
pub fn summary_text(kind: ContainerKind, count: usize) -> String {
    match (kind, count) {
        (ContainerKind::Sequence, 1) => "array (1 item) [...]".to_string(),
        (ContainerKind::Sequence, n) => format!("array ({n} items) [...]"),
        (ContainerKind::Mapping, 1) => "map (1 entry) {...}".to_string(),
        (ContainerKind::Mapping, n) => format!("map ({n} entries) {{...}}"),
    }
}

/// Text of a reference token.
#[must_use]
pub fn reference_text(identity: &Identity, style: RefStyle) -> String {
    match style {
        RefStyle::Fresh => format!("object@{identity}"),
        RefStyle::DepthExceeded | RefStyle::Excluded => format!("{identity} (...)"),
        RefStyle::Cycle => format!("object@{identity} (recursion)"),
    }
}

/// Where a snapshot is being written.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Placement {
    /// Nested in the inline tree.
    Inline,
    /// Inside a body of the identity map, where every callable already has
    /// its own entry and is written as bare source.
    MapBody,
}

struct SnapshotView<'a> {
    snapshot: &'a ValueSnapshot,
    placement: Placement,
}

impl<'a> SnapshotView<'a> {
    fn child(&self, snapshot: &'a ValueSnapshot) -> Self {
        Self {
            snapshot,
            placement: self.placement,
        }
    }
}

impl Serialize for InlineView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        SnapshotView {
            snapshot: self.0,
            placement: Placement::Inline,
        }
        .serialize(serializer)
    }
}

impl Serialize for SnapshotView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.snapshot {
            ValueSnapshot::Scalar(scalar) => serialize_scalar(scalar, serializer),
            ValueSnapshot::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
            ValueSnapshot::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(&key.to_string(), &self.child(value))?;
                }
                map.end()
            }
            ValueSnapshot::Composite { identity, fields } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(
                    &identity.to_string(),
                    &FieldsView {
                        fields,
                        placement: self.placement,
                    },
                )?;
                map.end()
            }
            ValueSnapshot::Callable { source, .. } if self.placement == Placement::MapBody => {
                serializer.serialize_str(source)
            }
            ValueSnapshot::Callable { identity, source } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(&identity.to_string(), &**source)?;
                map.end()
            }
            ValueSnapshot::Handle(handle) => serialize_handle(handle, serializer),
            ValueSnapshot::Summary { kind, count } => {
                serializer.serialize_str(&summary_text(*kind, *count))
            }
            ValueSnapshot::Reference { identity, style } => {
                serializer.serialize_str(&reference_text(identity, *style))
            }
        }
    }
}

impl Serialize for ObjectMapView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            return serializer.serialize_seq(Some(0))?.end();
        }
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (identity, snapshot) in self.0.entries() {
            let key = identity.to_string();
            match snapshot {
                ValueSnapshot::Composite { fields, .. } => map.serialize_entry(
                    &key,
                    &FieldsView {
                        fields,
                        placement: Placement::MapBody,
                    },
                )?,
                other => map.serialize_entry(
                    &key,
                    &SnapshotView {
                        snapshot: other,
                        placement: Placement::MapBody,
                    },
                )?,
            }
        }
        map.end()
    }
}

/// Field object keyed `"<visibility> $<name>"`.
struct FieldsView<'a> {
    fields: &'a [FieldSnapshot],
    placement: Placement,
}

impl Serialize for FieldsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in self.fields {
            let key = format!("{} ${}", field.visibility, field.name);
            let value = SnapshotView {
                snapshot: &field.value,
                placement: self.placement,
            };
            map.serialize_entry(&key, &value)?;
        }
        map.end()
    }
}

fn serialize_scalar<S: Serializer>(scalar: &Scalar, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match scalar {
        Scalar::Null => serializer.serialize_unit(),
        Scalar::Bool(b) => serializer.serialize_bool(*b),
        Scalar::Int(n) => serializer.serialize_i64(*n),
        Scalar::Float(n) if n.is_finite() => serializer.serialize_f64(*n),
        Scalar::Float(_) => serializer.serialize_none(),
        Scalar::Str(s) => serializer.serialize_str(s),
        Scalar::Bytes(b) => serializer.serialize_str(&String::from_utf8_lossy(b)),
    }
}

fn serialize_handle<S: Serializer>(
    handle: &HandleSnapshot,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let meta: &HandleMeta = match handle {
        HandleSnapshot::Open(meta) => meta,
        HandleSnapshot::Closed => return serializer.serialize_str(CLOSED_MARKER),
    };
    let len = if meta.uri.is_some() { 9 } else { 8 };
    let mut map = serializer.serialize_map(Some(len))?;
    map.serialize_entry("timed_out", &meta.timed_out)?;
    map.serialize_entry("blocked", &meta.blocked)?;
    map.serialize_entry("eof", &meta.eof)?;
    map.serialize_entry("wrapper_type", meta.wrapper_type)?;
    map.serialize_entry("stream_type", meta.stream_type)?;
    map.serialize_entry("mode", &*meta.mode)?;
    map.serialize_entry("unread_bytes", &meta.unread_bytes)?;
    map.serialize_entry("seekable", &meta.seekable)?;
    if let Some(uri) = &meta.uri {
        map.serialize_entry("uri", &**uri)?;
    }
    map.end()
}
