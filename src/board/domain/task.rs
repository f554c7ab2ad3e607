//! Task entity, priorities, and mutation payloads.

use super::{ParsePriorityError, TaskId};

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    /// Needs attention now.
    Immediate,
    /// Important, schedule soon.
    High,
    /// Regular work.
    Normal,
    /// Whenever there is time.
    Low,
}

impl Priority {
    /// All priorities in display order.
    pub const ALL: [Self; 4] = [Self::Immediate, Self::High, Self::Normal, Self::Low];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "Immediate",
            Self::High => "High",
            Self::Normal => "Normal",
            Self::Low => "Low",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "immediate" => Ok(Self::Immediate),
            "high" => Ok(Self::High),
            "normal" => Ok(Self::Normal),
            "low" => Ok(Self::Low),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// A single to-do entry as held in the canonical list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    priority: Option<Priority>,
    is_complete: bool,
}

/// Parameter object for reconstructing a task returned by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskParts {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Display title.
    pub title: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Optional priority.
    pub priority: Option<Priority>,
    /// Completion flag.
    pub is_complete: bool,
}

impl Task {
    /// Reconstructs a task from store-provided parts.
    #[must_use]
    pub fn from_parts(parts: TaskParts) -> Self {
        Self {
            id: parts.id,
            title: parts.title,
            description: parts.description,
            priority: parts.priority,
            is_complete: parts.is_complete,
        }
    }

    /// Materializes a creation payload under a store-assigned identifier.
    #[must_use]
    pub fn from_new(id: TaskId, new_task: NewTask) -> Self {
        Self {
            id,
            title: new_task.title,
            description: new_task.description,
            priority: new_task.priority,
            is_complete: false,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority, if set.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns whether the task is complete.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Applies every field present in `patch`.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(is_complete) = patch.is_complete {
            self.is_complete = is_complete;
        }
    }

    /// Overwrites the completion flag in place.
    pub(crate) const fn set_complete(&mut self, is_complete: bool) {
        self.is_complete = is_complete;
    }
}

/// Creation payload. The store request always carries `isComplete=false`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTask {
    /// Display title. Empty titles are accepted.
    pub title: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Optional priority.
    pub priority: Option<Priority>,
}

impl NewTask {
    /// Creates a payload with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Partial update. `None` leaves a field untouched; the nested options on
/// description and priority distinguish "clear" from "keep".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Replacement priority; `Some(None)` clears it.
    pub priority: Option<Option<Priority>>,
    /// Replacement completion flag.
    pub is_complete: Option<bool>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that only sets the completion flag.
    #[must_use]
    pub fn completion(is_complete: bool) -> Self {
        Self {
            is_complete: Some(is_complete),
            ..Self::default()
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets or clears the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns true when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.is_complete.is_none()
    }
}
