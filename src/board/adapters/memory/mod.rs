//! In-memory adapters for tests and demos.

mod alert;
mod store;

pub use alert::RecordingAlertSink;
pub use store::{InMemoryTaskStore, InjectedFailure, RecordedRequest, StoreGate, StoreOperation};
