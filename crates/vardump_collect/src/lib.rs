//! Record-then-delegate collectors for vardump.
//!
//! This crate provides:
//! - [`LogCollector`] - Records log messages, forwards to a [`Logger`]
//! - [`EventCollector`] - Records events, forwards to a [`Dispatcher`]
//! - [`RequestCollector`] - Keeps the request/response pair and times it
//! - [`Target`] - Export destination; [`DumpTarget`] snapshots payloads
//!
//! Every collector implements [`Collector`]: attach a target, then export.
//! Exporting before a target is attached is an error.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clock;
pub mod event;
pub mod log;
pub mod request;
pub mod target;

pub use clock::timestamp;
pub use event::{Dispatcher, EventCollector};
pub use log::{Level, LogCollector, Logger, TracingLogger};
pub use request::{
    Listener, ListenerProvider, REQUEST_END_EVENT, REQUEST_STARTED_EVENT, RequestCollector,
    RequestHandler,
};
pub use target::{BufferTarget, Collector, DumpRecord, DumpTarget, SharedTarget, Target, TargetSlot};
