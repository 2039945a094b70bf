//! Event sink: where the engine reports lifecycle events.
//!
//! The engine only ever calls [`EventSink::log`]; what happens to the event
//! is up to the sink. Events are:
//!
//! | event | details |
//! |-------|---------|
//! | `started` | configuration summary |
//! | `stopped` | final statistics |
//! | `inject` | the injected concept |

/// Fire-and-forget event consumer.
///
/// Implementations must not block; they are called from whichever thread
/// drives `start`, `stop` or `inject`.
pub trait EventSink: Send + Sync {
    fn log(&self, event: &str, details: &str);
}

/// Forwards events to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn log(&self, event: &str, details: &str) {
        tracing::info!(target: "holocell", event, details, "engine event");
    }
}

impl<F> EventSink for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn log(&self, event: &str, details: &str) {
        self(event, details)
    }
}
