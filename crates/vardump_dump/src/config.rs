//! Configuration for a dump.

use std::collections::BTreeSet;

/// Default depth budget.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Configuration for a dump.
///
/// Controls the depth budget, which types are never expanded, and whether
/// output text is indented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpConfig {
    /// Maximum number of nested levels expanded before summarizing.
    pub max_depth: usize,

    /// Type names that are never expanded.
    pub excluded_types: BTreeSet<String>,

    /// Emit multi-line, indented text.
    pub pretty: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            excluded_types: BTreeSet::new(),
            pretty: false,
        }
    }
}

impl DumpConfig {
    /// Creates a configuration for quick looks at large graphs.
    #[must_use]
    pub fn shallow() -> Self {
        Self {
            max_depth: 3,
            ..Self::default()
        }
    }

    /// Creates a configuration producing indented output.
    #[must_use]
    pub fn readable() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    /// Builder method to set the depth budget.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder method to exclude a type from expansion.
    #[must_use]
    pub fn exclude(mut self, type_name: impl Into<String>) -> Self {
        self.excluded_types.insert(type_name.into());
        self
    }

    /// Builder method to enable/disable indented output.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns true if values of this type are never expanded.
    #[must_use]
    pub fn is_excluded(&self, type_name: &str) -> bool {
        self.excluded_types.contains(type_name)
    }
}
