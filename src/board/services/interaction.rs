//! User-facing board interactions: filters, the form session, and item
//! menus.

use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use super::{BoardResult, TaskBoardController, controller::BoardState};
use crate::board::{
    domain::{
        FilterState, FormFields, FormMode, FormSession, FormState, FormSubmission,
        InteractionTarget, ItemState, Priority, Task, TaskDomainError, TaskId, derive_visible,
        open_exclusive,
    },
    ports::{AlertSink, TaskStore},
};

/// Keeps an item's `deleting` flag raised for its lifetime. Dropping it
/// clears the flag on every exit path, including cancellation.
struct DeletingGuard {
    state: Arc<RwLock<BoardState>>,
    id: TaskId,
}

impl DeletingGuard {
    fn engage(state: &Arc<RwLock<BoardState>>, id: &TaskId) -> Self {
        state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .set_deleting(id, true);
        Self {
            state: Arc::clone(state),
            id: id.clone(),
        }
    }
}

impl Drop for DeletingGuard {
    fn drop(&mut self) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .set_deleting(&self.id, false);
    }
}

impl<S, A, C> TaskBoardController<S, A, C>
where
    S: TaskStore,
    A: AlertSink,
    C: Clock + Send + Sync,
{
    /// Returns the active filter settings.
    #[must_use]
    pub fn filter(&self) -> FilterState {
        self.read().filter
    }

    /// Returns the canonical list with the active filters applied.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<Task> {
        let state = self.read();
        derive_visible(&state.tasks, &state.filter)
    }

    fn update_filter(&self, change: impl FnOnce(&mut FilterState)) {
        let mut state = self.write();
        change(&mut state.filter);
        state.sync_items();
    }

    /// Selects a priority filter, or clears it when already selected.
    pub fn select_priority_filter(&self, priority: Priority) {
        self.update_filter(|filter| filter.select_priority(priority));
    }

    /// Shows or hides completed tasks.
    pub fn set_hide_completed(&self, hide_completed: bool) {
        self.update_filter(|filter| filter.set_hide_completed(hide_completed));
    }

    /// Flips the hide-completed switch.
    pub fn toggle_hide_completed(&self) {
        self.update_filter(FilterState::toggle_hide_completed);
    }

    /// Clears every filter. Invoked by the surrounding navigation, for
    /// example on logout.
    pub fn reset_filters(&self) {
        self.update_filter(FilterState::reset);
    }

    /// Returns the form state.
    #[must_use]
    pub fn form_state(&self) -> FormState {
        FormState::of(self.read().form.as_ref())
    }

    /// Returns the form buffers while a form is open.
    #[must_use]
    pub fn form_fields(&self) -> Option<FormFields> {
        self.read().form.as_ref().map(|session| session.fields().clone())
    }

    /// Opens the add form with empty buffers.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::FormAlreadyOpen`] (wrapped) when a form is
    /// open.
    pub fn open_add_form(&self) -> BoardResult<()> {
        open_exclusive(&mut self.write().form, FormSession::add())?;
        debug!("add form opened");
        Ok(())
    }

    /// Opens the edit form seeded from the task's current values.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] or
    /// [`TaskDomainError::FormAlreadyOpen`] (wrapped).
    pub fn open_edit_form(&self, id: &TaskId) -> BoardResult<()> {
        let mut state = self.write();
        let session = FormSession::edit(state.find_task(id)?);
        open_exclusive(&mut state.form, session)?;
        debug!(task_id = %id, "edit form opened");
        Ok(())
    }

    /// Edits the open form's buffers in place.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::FormNotOpen`] (wrapped) when no form is
    /// open.
    pub fn edit_form(&self, edit: impl FnOnce(&mut FormFields)) -> BoardResult<()> {
        let mut state = self.write();
        let session = state.form.as_mut().ok_or(TaskDomainError::FormNotOpen)?;
        edit(session.fields_mut());
        Ok(())
    }

    /// Replaces the title buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::FormNotOpen`] (wrapped) when no form is
    /// open.
    pub fn set_form_title(&self, title: impl Into<String>) -> BoardResult<()> {
        let new_title = title.into();
        self.edit_form(|fields| fields.title = new_title)
    }

    /// Replaces the description buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::FormNotOpen`] (wrapped) when no form is
    /// open.
    pub fn set_form_description(&self, description: impl Into<String>) -> BoardResult<()> {
        let new_description = description.into();
        self.edit_form(|fields| fields.description = new_description)
    }

    /// Replaces the priority selection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::FormNotOpen`] (wrapped) when no form is
    /// open.
    pub fn set_form_priority(&self, priority: Option<Priority>) -> BoardResult<()> {
        self.edit_form(|fields| fields.priority = priority)
    }

    /// Closes the form and discards its buffers. Returns whether a form was
    /// open.
    #[must_use]
    pub fn cancel_form(&self) -> bool {
        let closed = self.write().form.take().is_some();
        if closed {
            debug!("form cancelled");
        }
        closed
    }

    /// Submits the open form.
    ///
    /// Add mode creates a task, edit mode sends title, description, and
    /// priority. On success the form closes and the list reloads; on
    /// failure the form stays open with the user's input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::FormNotOpen`] (wrapped) when no form is
    /// open, otherwise the failure of the underlying request.
    pub async fn save_form(&self) -> BoardResult<()> {
        let submission = self
            .read()
            .form
            .as_ref()
            .map(FormSession::submission)
            .ok_or(TaskDomainError::FormNotOpen)?;

        match submission {
            FormSubmission::Create(new_task) => self.create_task(new_task).await,
            FormSubmission::Update(id, patch) => {
                self.send_update(&id, &patch).await?;
                self.write().close_form_in(&FormMode::Edit(id));
                if self.load_tasks().await.is_err() {
                    debug!("reload after edit failed");
                }
                Ok(())
            }
        }
    }

    /// Returns the view state of a rendered item.
    #[must_use]
    pub fn item_state(&self, id: &TaskId) -> Option<ItemState> {
        self.read().items.get(id)
    }

    /// Returns whether the outside-interaction observer is registered.
    #[must_use]
    pub fn interaction_observer_active(&self) -> bool {
        self.read().items.observer_active()
    }

    /// Toggles an item's context menu and returns the new visibility.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] (wrapped) when the item is
    /// not rendered.
    pub fn toggle_item_menu(&self, id: &TaskId) -> BoardResult<bool> {
        Ok(self.write().items.toggle_menu(id)?)
    }

    /// Routes a pointer interaction to the outside-interaction observer and
    /// returns how many menus it closed.
    #[must_use]
    pub fn pointer_down(&self, target: &InteractionTarget) -> usize {
        self.write().items.pointer_down(target)
    }

    /// Handles "Edit" in an item menu: opens the edit form for the item and
    /// closes its menu. A rejected open leaves the menu as it was.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] when the item is not
    /// rendered, or [`TaskDomainError::FormAlreadyOpen`] (wrapped).
    pub fn edit_from_menu(&self, id: &TaskId) -> BoardResult<()> {
        let mut state = self.write();
        if state.items.get(id).is_none() {
            return Err(TaskDomainError::TaskNotFound(id.clone()).into());
        }
        let session = FormSession::edit(state.find_task(id)?);
        open_exclusive(&mut state.form, session)?;
        state.items.close_menu(id)?;
        debug!(task_id = %id, "edit form opened from item menu");
        Ok(())
    }

    /// Handles "Delete" in an item menu. The item shows as busy until the
    /// delete settles, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns the failure of [`Self::delete_task`].
    pub async fn delete_from_menu(&self, id: &TaskId) -> BoardResult<()> {
        let _busy = DeletingGuard::engage(&self.state, id);
        self.delete_task(id).await
    }
}
