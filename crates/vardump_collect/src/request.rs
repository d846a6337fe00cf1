//! Request timing.
//!
//! [`RequestCollector`] sits in two places at once: it wraps request
//! handling to keep the request and response, and it decorates the listener
//! provider so it can stamp the start and end events as they pass through.

use std::rc::Rc;

use tracing::trace;
use vardump_foundation::{Dict, Result, Value};

use crate::clock::timestamp;
use crate::target::{Collector, SharedTarget, TargetSlot};

/// Type name of the event stamped as the request start.
pub const REQUEST_STARTED_EVENT: &str = "RequestStartedEvent";

/// Type name of the event stamped as the request end.
pub const REQUEST_END_EVENT: &str = "RequestEndEvent";

/// Produces a response for a request.
pub trait RequestHandler {
    /// Handles `request`.
    fn handle(&mut self, request: Value) -> Value;
}

/// An event listener.
pub type Listener = Rc<dyn Fn(&Value)>;

/// Looks up the listeners for an event.
pub trait ListenerProvider {
    /// Returns the listeners interested in `event`.
    fn listeners_for(&mut self, event: &Value) -> Vec<Listener>;
}

/// Keeps the request/response pair and times the request.
pub struct RequestCollector<P: ListenerProvider> {
    provider: P,
    request: Option<Value>,
    response: Option<Value>,
    start: f64,
    stop: f64,
    target: TargetSlot,
}

impl<P: ListenerProvider> RequestCollector<P> {
    /// Wraps `provider`.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            request: None,
            response: None,
            start: 0.0,
            stop: 0.0,
            target: TargetSlot::new(),
        }
    }

    /// Keeps a copy of `request`, lets `handler` answer it and keeps the
    /// response.
    pub fn process(&mut self, request: Value, handler: &mut dyn RequestHandler) -> Value {
        self.request = Some(request.clone());
        let response = handler.handle(request);
        self.response = Some(response.clone());
        response
    }

    /// Stamps the request start.
    pub fn on_request_start(&mut self) {
        self.start = timestamp();
    }

    /// Stamps the request end.
    pub fn on_request_end(&mut self) {
        self.stop = timestamp();
    }

    /// Seconds between the start and end stamps.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }

    /// Returns the kept request.
    #[must_use]
    pub fn request(&self) -> Option<&Value> {
        self.request.as_ref()
    }

    /// Returns the kept response.
    #[must_use]
    pub fn response(&self) -> Option<&Value> {
        self.response.as_ref()
    }
}

impl<P: ListenerProvider> ListenerProvider for RequestCollector<P> {
    fn listeners_for(&mut self, event: &Value) -> Vec<Listener> {
        match &*event.type_name() {
            REQUEST_STARTED_EVENT => {
                trace!("request start stamped");
                self.on_request_start();
            }
            REQUEST_END_EVENT => {
                trace!("request end stamped");
                self.on_request_end();
            }
            _ => {}
        }
        self.provider.listeners_for(event)
    }
}

impl<P: ListenerProvider> Collector for RequestCollector<P> {
    fn set_target(&mut self, target: SharedTarget) {
        self.target.set(target);
    }

    fn export(&self) -> Result<()> {
        let payload = Dict::new()
            .insert("request", self.request.clone().unwrap_or_default())
            .insert("response", self.response.clone().unwrap_or_default())
            .insert("duration", self.duration());
        self.target.send("RequestCollector", Value::Dict(payload))
    }
}
