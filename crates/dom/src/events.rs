//! Event listener registration and dispatch types.

use core::fmt;
use indextree::NodeId;
use std::sync::Arc;

/// An event delivered to listeners of a node.
#[derive(Debug, Clone)]
pub struct Event {
    /// The event type (e.g., "click", "input").
    pub event_type: String,
    /// The node the event was dispatched on.
    pub target: NodeId,
}

/// Type-erased event callback.
pub type EventCallback = Arc<dyn Fn(&Event) + Send + Sync>;

/// The handle-event capability: any object exposing it can be registered
/// as a listener, exactly like a callable.
pub trait HandleEvent: Send + Sync {
    fn handle_event(&self, event: &Event);
}

/// A registered listener: a callable, or an object carrying the
/// handle-event capability. Both are invoked uniformly.
#[derive(Clone)]
pub enum Listener {
    Callback(EventCallback),
    Handler(Arc<dyn HandleEvent>),
}

impl Listener {
    pub fn invoke(&self, event: &Event) {
        match self {
            Self::Callback(callback) => callback(event),
            Self::Handler(handler) => handler.handle_event(event),
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => formatter.write_str("Listener::Callback"),
            Self::Handler(_) => formatter.write_str("Listener::Handler"),
        }
    }
}

/// Options accepted at listener registration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Remove the listener after its first invocation.
    pub once: bool,
    pub capture: bool,
    pub passive: bool,
}

/// One registered listener on a node.
#[derive(Clone, Debug)]
pub struct ListenerEntry {
    pub event_type: String,
    pub listener: Listener,
    pub options: ListenerOptions,
}
