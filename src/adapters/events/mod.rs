//! Payment event listener implementations.
//!
//! - `TracingEventListener` - Default listener; logs each event
//! - `RecordingEventListener` - Test listener capturing invocations

mod recording_listener;
mod tracing_listener;

pub use recording_listener::{RecordedEvent, RecordingEventListener};
pub use tracing_listener::TracingEventListener;
