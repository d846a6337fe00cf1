//! Per-dump identity registry.
//!
//! Assigns identity tokens to composites and callables by allocation address,
//! and holds the canonical snapshot of every identity that was expanded.
//! A registry belongs to exactly one dump session; nothing is shared between
//! dumps.

use std::collections::HashMap;
use std::rc::Rc;

use vardump_foundation::{Closure, Composite, Value};

use crate::snapshot::{Identity, ValueSnapshot};

/// Identity tokens and canonical snapshots for one dump.
#[derive(Default)]
pub struct IdentityRegistry {
    /// Allocation address → assigned identity.
    tokens: HashMap<*const (), Identity>,
    /// Every identified value, kept alive so its address cannot be reused
    /// mid-dump by a composite that builds field values on the fly.
    retained: Vec<Value>,
    /// Canonical identities in discovery order.
    order: Vec<Identity>,
    /// Token → canonical snapshot. A reserved identity has no entry until
    /// its expansion finishes.
    canonical: HashMap<u64, ValueSnapshot>,
    /// Tokens that have a slot in `order`.
    reserved: HashMap<u64, usize>,
}

impl IdentityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identity of a composite or callable, assigning the next
    /// token on first encounter.
    ///
    /// Returns `None` for values that have no identity.
    pub fn identify(&mut self, value: &Value) -> Option<Identity> {
        match value {
            Value::Object(obj) => Some(self.identify_object(obj)),
            Value::Closure(c) => Some(self.identify_closure(c)),
            _ => None,
        }
    }

    /// Returns the identity of a composite.
    pub fn identify_object(&mut self, obj: &Rc<dyn Composite>) -> Identity {
        let address = Rc::as_ptr(obj).cast::<()>();
        self.assign(address, || {
            (Rc::clone(&obj.descriptor().name), Value::Object(Rc::clone(obj)))
        })
    }

    /// Returns the identity of a callable.
    pub fn identify_closure(&mut self, closure: &Rc<Closure>) -> Identity {
        let address = Rc::as_ptr(closure).cast::<()>();
        self.assign(address, || {
            (Rc::from(closure.type_name()), Value::Closure(Rc::clone(closure)))
        })
    }

    fn assign(&mut self, address: *const (), first: impl FnOnce() -> (Rc<str>, Value)) -> Identity {
        if let Some(identity) = self.tokens.get(&address) {
            return identity.clone();
        }
        let (type_name, keep) = first();
        let identity = Identity {
            token: self.next_token(),
            type_name,
        };
        self.tokens.insert(address, identity.clone());
        self.retained.push(keep);
        identity
    }

    fn next_token(&self) -> u64 {
        // `usize` is never wider than 64 bits, so every count fits.
        self.tokens.len() as u64 + 1
    }

    /// Returns true if the identity has a canonical slot, filled or not.
    #[must_use]
    pub fn is_registered(&self, token: u64) -> bool {
        self.reserved.contains_key(&token)
    }

    /// Reserves the canonical slot for an identity in discovery order.
    ///
    /// Returns false if the identity already had a slot; first occurrence wins.
    pub fn reserve(&mut self, identity: &Identity) -> bool {
        if self.reserved.contains_key(&identity.token) {
            return false;
        }
        self.reserved.insert(identity.token, self.order.len());
        self.order.push(identity.clone());
        true
    }

    /// Stores the canonical snapshot of a reserved identity.
    ///
    /// A snapshot already stored for the token is kept.
    pub fn fill(&mut self, token: u64, snapshot: ValueSnapshot) {
        if self.reserved.contains_key(&token) {
            self.canonical.entry(token).or_insert(snapshot);
        }
    }

    /// Returns the canonical snapshot of an identity.
    #[must_use]
    pub fn get(&self, token: u64) -> Option<&ValueSnapshot> {
        self.canonical.get(&token)
    }

    /// Returns canonical entries in discovery order.
    pub fn entries(&self) -> impl Iterator<Item = (&Identity, &ValueSnapshot)> {
        self.order
            .iter()
            .filter_map(|identity| Some((identity, self.canonical.get(&identity.token)?)))
    }

    /// Returns the number of canonical entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing was registered canonically.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the number of identities assigned, canonical or not.
    #[must_use]
    pub fn identity_count(&self) -> usize {
        self.tokens.len()
    }
}
