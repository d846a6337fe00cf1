//! vardump - Structural dumps of in-memory value graphs
//!
//! This crate re-exports all layers of vardump for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: vardump_collect    — Log, event and request collectors, export targets
//! Layer 1: vardump_dump       — Renderer, identity registry, text emitters
//! Layer 0: vardump_foundation — Value graph model (Value, Composite, Closure, Handle, Error)
//! ```

pub use vardump_collect as collect;
pub use vardump_dump as dump;
pub use vardump_foundation as foundation;
