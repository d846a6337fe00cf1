//! Integration tests for Layer 0: Foundation
//!
//! Tests for the value graph model: Value, composites, closures, handles and Error.

mod composites;
mod errors;
