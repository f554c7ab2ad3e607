//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by the controller.

pub mod alert;
pub mod store;

pub use alert::AlertSink;
pub use store::{StoreResponse, TaskStore, TaskStoreError, TaskStoreResult};

#[cfg(test)]
pub use alert::MockAlertSink;
#[cfg(test)]
pub use store::MockTaskStore;
