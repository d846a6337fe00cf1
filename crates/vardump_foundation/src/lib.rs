//! Value graph model for vardump.
//!
//! This crate provides:
//! - [`Value`] - The closed value type every dump walks
//! - [`Composite`] and [`Record`] - Record-like values with visibility-tagged fields
//! - [`Closure`] - Callables carrying their declaration source
//! - [`Handle`] - External resources (files, sockets, directories, processes)
//! - [`Kind`] - Classification tags
//! - [`Error`] - Rich error types with context
//! - Ordered collections ([`Seq`], [`Dict`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod closure;
pub mod collections;
pub mod error;
pub mod handle;
pub mod record;
pub mod types;
pub mod value;

pub use closure::{Closure, ImportScope};
pub use collections::{Dict, Key, Seq};
pub use error::{Error, ErrorKind, Result};
pub use handle::{Handle, HandleKind};
pub use record::{Composite, FieldDescriptor, Record, TypeDescriptor, Visibility};
pub use types::Kind;
pub use value::Value;
