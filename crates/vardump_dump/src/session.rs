//! The depth-bounded, cycle-safe renderer.
//!
//! A [`DumpSession`] walks one value graph and produces a [`ValueSnapshot`]
//! tree, registering every composite and callable it meets in its
//! [`IdentityRegistry`]. Two sets are kept apart here:
//!
//! - the registry is dump-global and decides which occurrence is canonical;
//! - the path set holds only the composites on the current descent and is
//!   used to break structural cycles.

use std::collections::HashSet;
use std::rc::Rc;

use tracing::trace;
use vardump_foundation::{Closure, Result, Value};

use crate::classify::{Classified, CompositeView, classify};
use crate::config::DumpConfig;
use crate::emit::{InlineView, ObjectMapView, to_text};
use crate::introspect::introspect;
use crate::registry::IdentityRegistry;
use crate::snapshot::{ContainerKind, FieldSnapshot, Identity, RefStyle, ValueSnapshot};
use crate::source::extract_source;

/// State for one dump.
///
/// Create one per dump call and drop it afterwards; nothing carries over
/// between sessions.
pub struct DumpSession<'c> {
    config: &'c DumpConfig,
    registry: IdentityRegistry,
    path: HashSet<u64>,
}

impl<'c> DumpSession<'c> {
    /// Creates a session with an empty registry.
    #[must_use]
    pub fn new(config: &'c DumpConfig) -> Self {
        Self {
            config,
            registry: IdentityRegistry::new(),
            path: HashSet::new(),
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &DumpConfig {
        self.config
    }

    /// Returns the identities registered so far.
    #[must_use]
    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    /// Renders `value` as the root of the dump, at depth 0.
    pub fn render(&mut self, value: &Value) -> ValueSnapshot {
        self.render_at(value, 0)
    }

    /// Renders `value` and ends the session.
    pub fn finish(mut self, value: &Value) -> Dump {
        let root = self.render(value);
        Dump {
            root,
            registry: self.registry,
        }
    }

    fn render_at(&mut self, value: &Value, depth: usize) -> ValueSnapshot {
        match classify(value) {
            Classified::Scalar(scalar) => ValueSnapshot::Scalar(scalar),
            Classified::Sequence(seq) => {
                if seq.is_empty() {
                    ValueSnapshot::Sequence(Vec::new())
                } else if depth >= self.config.max_depth {
                    trace!(depth, count = seq.len(), "sequence summarized");
                    ValueSnapshot::Summary {
                        kind: ContainerKind::Sequence,
                        count: seq.len(),
                    }
                } else {
                    ValueSnapshot::Sequence(
                        seq.iter().map(|v| self.render_at(v, depth + 1)).collect(),
                    )
                }
            }
            Classified::Mapping(dict) => {
                if dict.is_empty() {
                    ValueSnapshot::Mapping(Vec::new())
                } else if depth >= self.config.max_depth {
                    trace!(depth, count = dict.len(), "mapping summarized");
                    ValueSnapshot::Summary {
                        kind: ContainerKind::Mapping,
                        count: dict.len(),
                    }
                } else {
                    ValueSnapshot::Mapping(
                        dict.iter()
                            .map(|(k, v)| (k.clone(), self.render_at(v, depth + 1)))
                            .collect(),
                    )
                }
            }
            Classified::Composite { object, view } => {
                let identity = self.registry.identify_object(object);
                self.render_composite(identity, view, depth)
            }
            Classified::Callable(closure) => self.render_callable(closure),
            Classified::Handle(handle) => ValueSnapshot::Handle(introspect(handle)),
        }
    }

    fn render_composite(
        &mut self,
        identity: Identity,
        view: CompositeView,
        depth: usize,
    ) -> ValueSnapshot {
        let token = identity.token;

        if self.config.is_excluded(&identity.type_name) {
            trace!(%identity, "excluded type");
            return reference(identity, RefStyle::Excluded);
        }

        // Stateless composites bypass the cycle and depth checks.
        if view.is_stateless() {
            if !self.registry.reserve(&identity) {
                return reference(identity, RefStyle::Fresh);
            }
            let snapshot = ValueSnapshot::Composite {
                identity: identity.clone(),
                fields: Vec::new(),
            };
            return self.place(identity, snapshot, depth);
        }

        if self.path.contains(&token) {
            trace!(%identity, depth, "cycle break");
            return reference(identity, RefStyle::Cycle);
        }
        if depth >= self.config.max_depth {
            trace!(%identity, depth, "depth exceeded");
            return reference(identity, RefStyle::DepthExceeded);
        }
        if !self.registry.reserve(&identity) {
            return reference(identity, RefStyle::Fresh);
        }

        self.path.insert(token);
        let fields = view
            .fields
            .into_iter()
            .map(|field| FieldSnapshot {
                value: self.render_at(&field.value, depth + 1),
                name: field.name,
                visibility: field.visibility,
            })
            .collect();
        self.path.remove(&token);

        let snapshot = ValueSnapshot::Composite {
            identity: identity.clone(),
            fields,
        };
        self.place(identity, snapshot, depth)
    }

    /// Stores the canonical snapshot of a reserved composite and returns what
    /// appears at its position: the body at the root, a fresh reference below.
    fn place(&mut self, identity: Identity, snapshot: ValueSnapshot, depth: usize) -> ValueSnapshot {
        if depth == 0 {
            self.registry.fill(identity.token, snapshot.clone());
            snapshot
        } else {
            self.registry.fill(identity.token, snapshot);
            reference(identity, RefStyle::Fresh)
        }
    }

    fn render_callable(&mut self, closure: &Rc<Closure>) -> ValueSnapshot {
        let identity = self.registry.identify_closure(closure);
        if self.config.is_excluded(&identity.type_name) {
            trace!(%identity, "excluded type");
            return reference(identity, RefStyle::Excluded);
        }

        let source = match self.registry.get(identity.token) {
            Some(ValueSnapshot::Callable { source, .. }) => Rc::clone(source),
            _ => {
                let source: Rc<str> = extract_source(closure).into();
                self.registry.reserve(&identity);
                self.registry.fill(
                    identity.token,
                    ValueSnapshot::Callable {
                        identity: identity.clone(),
                        source: Rc::clone(&source),
                    },
                );
                source
            }
        };
        ValueSnapshot::Callable { identity, source }
    }
}

fn reference(identity: Identity, style: RefStyle) -> ValueSnapshot {
    ValueSnapshot::Reference { identity, style }
}

/// A finished dump: the rendered root and the registry it produced.
///
/// Both output modes can be emitted from the same dump.
pub struct Dump {
    root: ValueSnapshot,
    registry: IdentityRegistry,
}

impl Dump {
    /// Renders `value` in a fresh session.
    #[must_use]
    pub fn capture(value: &Value, config: &DumpConfig) -> Self {
        DumpSession::new(config).finish(value)
    }

    /// Returns the rendered root.
    #[must_use]
    pub fn root(&self) -> &ValueSnapshot {
        &self.root
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    /// Emits the nested inline text.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the emitter fails.
    pub fn to_inline(&self, pretty: bool) -> Result<String> {
        to_text(&InlineView(&self.root), pretty)
    }

    /// Emits the flat identity-to-snapshot text.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the emitter fails.
    pub fn to_identity_map(&self, pretty: bool) -> Result<String> {
        to_text(&ObjectMapView(&self.registry), pretty)
    }
}
