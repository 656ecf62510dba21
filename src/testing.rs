//! Captures `tracing` events emitted on the current thread.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

/// One recorded event: its message and the names of its other fields.
#[derive(Debug, Clone, Default)]
pub(crate) struct Captured {
    pub message: String,
    pub fields: Vec<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedEvents(Arc<Mutex<Vec<Captured>>>);

impl CapturedEvents {
    /// Events whose message equals `message`, in emission order.
    pub fn with_message(&self, message: &str) -> Vec<Captured> {
        self.0
            .lock()
            .expect("capture lock")
            .iter()
            .filter(|e| e.message == message)
            .cloned()
            .collect()
    }
}

impl Visit for Captured {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(field.name());
        }
    }
}

impl<S: Subscriber> Layer<S> for CapturedEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut captured = Captured::default();
        event.record(&mut captured);
        self.0.lock().expect("capture lock").push(captured);
    }
}

/// Runs `f` with a subscriber that records every event on this thread.
///
/// Work handed to rayon workers is not captured.
pub(crate) fn capture<T>(f: impl FnOnce() -> T) -> (T, CapturedEvents) {
    let events = CapturedEvents::default();
    let subscriber = tracing_subscriber::registry().with(events.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, events)
}
