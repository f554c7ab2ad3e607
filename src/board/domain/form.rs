//! Add/edit modal state machine.
//!
//! At most one session exists at a time: the board holds an
//! `Option<FormSession>`, so "closed" is the absence of a session rather
//! than a flag beside a separately tracked edit target.

use super::{NewTask, Priority, Task, TaskDomainError, TaskId, TaskPatch};

/// What a save will do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormMode {
    /// Save creates a new task.
    Add,
    /// Save updates the identified task.
    Edit(TaskId),
}

/// Observable form state, including the closed state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormState {
    /// No modal is open.
    Closed,
    /// The add modal is open.
    Add,
    /// The edit modal is open for the identified task.
    Edit(TaskId),
}

impl FormState {
    /// Projects an optional session onto its observable state.
    #[must_use]
    pub fn of(session: Option<&FormSession>) -> Self {
        match session.map(FormSession::mode) {
            None => Self::Closed,
            Some(FormMode::Add) => Self::Add,
            Some(FormMode::Edit(id)) => Self::Edit(id.clone()),
        }
    }
}

/// Field buffers edited by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    /// Title input.
    pub title: String,
    /// Description input; empty means no description.
    pub description: String,
    /// Priority selection.
    pub priority: Option<Priority>,
}

impl FormFields {
    /// Buffers seeded from an existing task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().to_owned(),
            description: task.description().unwrap_or_default().to_owned(),
            priority: task.priority(),
        }
    }

    fn description_value(&self) -> Option<String> {
        if self.description.is_empty() {
            None
        } else {
            Some(self.description.clone())
        }
    }

    /// Creation payload for an add-mode save.
    #[must_use]
    pub fn to_new_task(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description_value(),
            priority: self.priority,
        }
    }

    /// Update payload for an edit-mode save. All three fields are sent.
    #[must_use]
    pub fn to_patch(&self) -> TaskPatch {
        TaskPatch::new()
            .with_title(self.title.clone())
            .with_description(self.description_value())
            .with_priority(self.priority)
    }
}

/// An open add or edit modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    mode: FormMode,
    fields: FormFields,
}

/// The request a save resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    /// Create a new task.
    Create(NewTask),
    /// Update an existing task.
    Update(TaskId, TaskPatch),
}

impl FormSession {
    /// Opens an add session with empty buffers.
    #[must_use]
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            fields: FormFields::default(),
        }
    }

    /// Opens an edit session seeded from `task`.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id().clone()),
            fields: FormFields::from_task(task),
        }
    }

    /// Returns the session mode.
    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Returns the field buffers.
    #[must_use]
    pub const fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Returns the field buffers for editing.
    pub const fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// Builds the store request for a save.
    #[must_use]
    pub fn submission(&self) -> FormSubmission {
        match &self.mode {
            FormMode::Add => FormSubmission::Create(self.fields.to_new_task()),
            FormMode::Edit(id) => FormSubmission::Update(id.clone(), self.fields.to_patch()),
        }
    }
}

/// Opens `next` in `slot` unless a session is already open.
///
/// # Errors
///
/// Returns [`TaskDomainError::FormAlreadyOpen`] and leaves the existing
/// session untouched when `slot` is occupied.
pub fn open_exclusive(
    slot: &mut Option<FormSession>,
    next: FormSession,
) -> Result<(), TaskDomainError> {
    if slot.is_some() {
        return Err(TaskDomainError::FormAlreadyOpen);
    }
    *slot = Some(next);
    Ok(())
}
