//! Domain model for the task board.
//!
//! Tasks, filters, the add/edit form session, and per-item view state. No
//! infrastructure concerns cross this boundary.

mod error;
mod filter;
mod form;
mod ids;
mod item;
mod task;

pub use error::{ParsePriorityError, TaskDomainError};
pub use filter::{FilterState, PriorityFilter, derive_visible};
pub use form::{FormFields, FormMode, FormSession, FormState, FormSubmission, open_exclusive};
pub use ids::TaskId;
pub use item::{InteractionTarget, ItemArena, ItemState};
pub use task::{NewTask, Priority, Task, TaskParts, TaskPatch};
