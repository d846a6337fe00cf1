//! Event recording.

use tracing::trace;
use vardump_foundation::{Dict, Result, Seq, Value};

use crate::clock::timestamp;
use crate::target::{Collector, SharedTarget, TargetSlot};

/// Dispatches events to their listeners.
pub trait Dispatcher {
    /// Dispatches `event` and returns it, possibly modified by listeners.
    fn dispatch(&mut self, event: Value) -> Value;
}

/// Records every event, then passes it to the wrapped dispatcher.
pub struct EventCollector<D: Dispatcher> {
    inner: D,
    events: Vec<Value>,
    target: TargetSlot,
}

impl<D: Dispatcher> EventCollector<D> {
    /// Wraps `inner`.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            events: Vec::new(),
            target: TargetSlot::new(),
        }
    }

    /// Returns the buffered `{event, time}` entries, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Returns the wrapped dispatcher.
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: Dispatcher> Dispatcher for EventCollector<D> {
    fn dispatch(&mut self, event: Value) -> Value {
        trace!(event = %event.type_name(), "event buffered");
        self.events.push(Value::Dict(
            Dict::new()
                .insert("event", event.clone())
                .insert("time", timestamp()),
        ));
        self.inner.dispatch(event)
    }
}

impl<D: Dispatcher> Collector for EventCollector<D> {
    fn set_target(&mut self, target: SharedTarget) {
        self.target.set(target);
    }

    fn export(&self) -> Result<()> {
        let payload: Seq = self.events.iter().cloned().collect();
        self.target.send("EventCollector", Value::Seq(payload))
    }
}
