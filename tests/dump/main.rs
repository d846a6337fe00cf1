//! Integration tests for Layer 1: Dump
//!
//! Tests for the renderer, identity registry and both text forms.

mod closures;
mod cycles;
mod objects_map;
