//! Structural dumps of vardump value graphs.
//!
//! This crate provides:
//! - [`Dumper`] - Entry point producing inline or identity-map text
//! - [`DumpSession`] - The depth-bounded, cycle-safe renderer
//! - [`IdentityRegistry`] - Per-dump identity tokens and canonical snapshots
//! - [`ValueSnapshot`] - The rendered tree
//! - [`classify`], [`introspect`], [`extract_source`] - Leaf helpers
//! - [`DumpConfig`] - Depth budget, excluded types, indentation
//!
//! # Example
//!
//! ```
//! use vardump_dump::{DumpConfig, dump_inline};
//! use vardump_foundation::Value;
//!
//! let value = Value::from(vec![Value::Int(1), Value::from(vec![2])]);
//! let config = DumpConfig::default().with_max_depth(0);
//! assert_eq!(dump_inline(&value, &config).unwrap(), r#""array (2 items) [...]""#);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classify;
pub mod config;
pub mod emit;
pub mod introspect;
pub mod registry;
pub mod session;
pub mod snapshot;
pub mod source;

pub use classify::{Classified, CompositeView, FieldView, classify};
pub use config::{DEFAULT_MAX_DEPTH, DumpConfig};
pub use emit::{CLOSED_MARKER, InlineView, ObjectMapView, to_text};
pub use introspect::introspect;
pub use registry::IdentityRegistry;
pub use session::{Dump, DumpSession};
pub use snapshot::{
    ContainerKind, FieldSnapshot, HandleMeta, HandleSnapshot, Identity, RefStyle, Scalar,
    ValueSnapshot,
};
pub use source::{extract_source, qualify_parameters};

use tracing::debug;
use vardump_foundation::{Result, Value};

/// Dumps `value` as nested inline text.
///
/// # Errors
///
/// Returns a serialization error if the emitter fails.
pub fn dump_inline(value: &Value, config: &DumpConfig) -> Result<String> {
    let dump = Dump::capture(value, config);
    log_finished(&dump, "inline");
    dump.to_inline(config.pretty)
}

/// Dumps `value` as a flat map from identity to canonical snapshot.
///
/// # Errors
///
/// Returns a serialization error if the emitter fails.
pub fn dump_identity_map(value: &Value, config: &DumpConfig) -> Result<String> {
    let dump = Dump::capture(value, config);
    log_finished(&dump, "identity_map");
    dump.to_identity_map(config.pretty)
}

fn log_finished(dump: &Dump, mode: &'static str) {
    debug!(
        mode,
        identities = dump.registry().identity_count(),
        canonical = dump.registry().len(),
        "dump finished"
    );
}

/// A value paired with the configuration to dump it with.
///
/// Every call starts a fresh session, so repeated calls on the same value
/// yield identical text.
#[derive(Clone, Debug)]
pub struct Dumper {
    value: Value,
    config: DumpConfig,
}

impl Dumper {
    /// Creates a dumper with the default configuration.
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_config(value, DumpConfig::default())
    }

    /// Creates a dumper with the given configuration.
    pub fn with_config(value: impl Into<Value>, config: DumpConfig) -> Self {
        Self {
            value: value.into(),
            config,
        }
    }

    /// Returns the value being dumped.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    /// Dumps as inline text with the given depth budget and indentation.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the emitter fails.
    pub fn as_inline(&self, max_depth: usize, pretty: bool) -> Result<String> {
        dump_inline(&self.value, &self.overridden(max_depth, pretty))
    }

    /// Dumps as an identity map with the given depth budget and indentation.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the emitter fails.
    pub fn as_identity_map(&self, max_depth: usize, pretty: bool) -> Result<String> {
        dump_identity_map(&self.value, &self.overridden(max_depth, pretty))
    }

    fn overridden(&self, max_depth: usize, pretty: bool) -> DumpConfig {
        self.config
            .clone()
            .with_max_depth(max_depth)
            .with_pretty(pretty)
    }
}
