//! Export targets.
//!
//! A collector buffers what it observes and, on export, hands the buffer to a
//! [`Target`] as one payload. Targets are shared between collectors.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{trace, warn};
use vardump_dump::{Dump, DumpConfig};
use vardump_foundation::{Error, Result, Value};

/// Destination for exported payloads.
pub trait Target {
    /// Accepts one exported payload.
    fn add(&mut self, payload: Value);
}

/// A target shared by several collectors.
pub type SharedTarget = Rc<RefCell<dyn Target>>;

/// Something that records data and exports it to a target.
pub trait Collector {
    /// Attaches the export destination.
    fn set_target(&mut self, target: SharedTarget);

    /// Sends everything collected so far to the target.
    ///
    /// # Errors
    ///
    /// Returns a "not configured" error if no target is attached.
    fn export(&self) -> Result<()>;
}

/// Holds the optional target of a collector.
#[derive(Clone, Default)]
pub struct TargetSlot {
    target: Option<SharedTarget>,
}

impl TargetSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a target, replacing any previous one.
    pub fn set(&mut self, target: SharedTarget) {
        self.target = Some(target);
    }

    /// Returns true if a target is attached.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.target.is_some()
    }

    /// Delivers `payload` to the attached target.
    ///
    /// # Errors
    ///
    /// Returns a "not configured" error naming `component` if no target is
    /// attached, or an internal error if the target is already borrowed.
    pub fn send(&self, component: &'static str, payload: Value) -> Result<()> {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| Error::not_configured(component))?;
        let mut target = target
            .try_borrow_mut()
            .map_err(|e| Error::internal(e.to_string()).with_context(component))?;
        trace!(component, "payload exported");
        target.add(payload);
        Ok(())
    }
}

/// Keeps every payload as-is.
#[derive(Debug, Default)]
pub struct BufferTarget {
    payloads: Vec<Value>,
}

impl BufferTarget {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer ready to share between collectors.
    #[must_use]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Returns the payloads received so far.
    #[must_use]
    pub fn payloads(&self) -> &[Value] {
        &self.payloads
    }
}

impl Target for BufferTarget {
    fn add(&mut self, payload: Value) {
        self.payloads.push(payload);
    }
}

/// Both text forms of one exported payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpRecord {
    /// Inline text.
    pub inline: String,
    /// Identity-map text.
    pub objects: String,
}

/// Snapshots every payload as soon as it arrives.
///
/// Later mutation of the exported values does not affect what was recorded.
#[derive(Debug, Default)]
pub struct DumpTarget {
    config: DumpConfig,
    records: Vec<DumpRecord>,
}

impl DumpTarget {
    /// Creates a target dumping with `config`.
    #[must_use]
    pub fn new(config: DumpConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
        }
    }

    /// Creates a target ready to share between collectors.
    #[must_use]
    pub fn shared(config: DumpConfig) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(config)))
    }

    /// Returns the records taken so far.
    #[must_use]
    pub fn records(&self) -> &[DumpRecord] {
        &self.records
    }

    fn record(&self, payload: &Value) -> Result<DumpRecord> {
        let dump = Dump::capture(payload, &self.config);
        Ok(DumpRecord {
            inline: dump.to_inline(self.config.pretty)?,
            objects: dump.to_identity_map(self.config.pretty)?,
        })
    }
}

impl Target for DumpTarget {
    fn add(&mut self, payload: Value) {
        match self.record(&payload) {
            Ok(record) => self.records.push(record),
            Err(error) => warn!(%error, "payload skipped"),
        }
    }
}
