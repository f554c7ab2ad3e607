//! Application services for the task board.

mod config;
mod controller;
mod error;
mod interaction;

pub use config::{BoardConfig, TogglePolicy};
pub use controller::{DELETE_FAILED_ALERT, SyncStatus, TaskBoardController};
pub use error::{BoardError, BoardOperation, BoardResult};
