//! Priority and completion filtering over the canonical task list.
//!
//! Filtering only removes elements; surviving tasks keep the order the store
//! returned them in.

use super::{Priority, Task};

/// Priority selection applied to the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriorityFilter {
    /// No priority restriction.
    #[default]
    All,
    /// Keep only tasks with exactly this priority.
    Only(Priority),
}

impl PriorityFilter {
    /// Returns whether `task` passes this filter.
    #[must_use]
    pub fn admits(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(priority) => task.priority() == Some(priority),
        }
    }
}

/// Session-local filter settings. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FilterState {
    priority: PriorityFilter,
    hide_completed: bool,
}

impl FilterState {
    /// Creates the unfiltered state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active priority filter.
    #[must_use]
    pub const fn priority(&self) -> PriorityFilter {
        self.priority
    }

    /// Returns whether completed tasks are hidden.
    #[must_use]
    pub const fn hide_completed(&self) -> bool {
        self.hide_completed
    }

    /// Selects `priority`, or clears the filter if it is already active.
    pub fn select_priority(&mut self, priority: Priority) {
        self.priority = if self.priority == PriorityFilter::Only(priority) {
            PriorityFilter::All
        } else {
            PriorityFilter::Only(priority)
        };
    }

    /// Sets whether completed tasks are hidden.
    pub const fn set_hide_completed(&mut self, hide_completed: bool) {
        self.hide_completed = hide_completed;
    }

    /// Flips the hide-completed switch.
    pub const fn toggle_hide_completed(&mut self) {
        self.hide_completed = !self.hide_completed;
    }

    /// Restores the unfiltered state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns whether `task` is visible under this state.
    #[must_use]
    pub fn admits(&self, task: &Task) -> bool {
        self.priority.admits(task) && !(self.hide_completed && task.is_complete())
    }
}

/// Derives the visible list from the canonical list.
#[must_use]
pub fn derive_visible(tasks: &[Task], filter: &FilterState) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.admits(task))
        .cloned()
        .collect()
}
