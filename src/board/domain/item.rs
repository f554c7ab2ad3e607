//! Per-item transient view state.
//!
//! Every visible task owns one [`ItemState`] in an [`ItemArena`] keyed by
//! task id. Entries appear when a task becomes visible and vanish when it
//! leaves the visible list.

use super::{TaskDomainError, TaskId};
use std::collections::HashMap;

/// Transient view state of one rendered task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ItemState {
    menu_open: bool,
    deleting: bool,
}

impl ItemState {
    /// Returns whether the context menu is open.
    #[must_use]
    pub const fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Returns whether a delete is in flight for this item.
    #[must_use]
    pub const fn deleting(&self) -> bool {
        self.deleting
    }
}

/// Where a pointer interaction landed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InteractionTarget {
    /// Inside the open menu of the identified item.
    Menu(TaskId),
    /// On the menu trigger of the identified item.
    MenuTrigger(TaskId),
    /// Anywhere else.
    Elsewhere,
}

impl InteractionTarget {
    /// Returns whether the interaction hit any menu region or trigger.
    #[must_use]
    pub const fn is_menu_region(&self) -> bool {
        matches!(self, Self::Menu(_) | Self::MenuTrigger(_))
    }
}

/// Arena of item view states for the visible list.
#[derive(Debug, Clone, Default)]
pub struct ItemArena {
    items: HashMap<TaskId, ItemState>,
}

impl ItemArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the arena in line with the visible ids: new ids get fresh
    /// state, ids no longer visible are discarded, survivors keep theirs.
    pub fn reconcile<'a>(&mut self, visible: impl IntoIterator<Item = &'a TaskId>) {
        let mut next = HashMap::new();
        for id in visible {
            let state = self.items.remove(id).unwrap_or_default();
            next.insert(id.clone(), state);
        }
        self.items = next;
    }

    /// Returns the state of a rendered item.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<ItemState> {
        self.items.get(id).copied()
    }

    /// Returns the number of rendered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether no items are rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn get_mut(&mut self, id: &TaskId) -> Result<&mut ItemState, TaskDomainError> {
        self.items
            .get_mut(id)
            .ok_or_else(|| TaskDomainError::TaskNotFound(id.clone()))
    }

    /// Toggles the menu of a rendered item and returns the new visibility.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] when the item is not
    /// rendered.
    pub fn toggle_menu(&mut self, id: &TaskId) -> Result<bool, TaskDomainError> {
        let item = self.get_mut(id)?;
        item.menu_open = !item.menu_open;
        Ok(item.menu_open)
    }

    /// Closes the menu of a rendered item.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] when the item is not
    /// rendered.
    pub fn close_menu(&mut self, id: &TaskId) -> Result<(), TaskDomainError> {
        self.get_mut(id)?.menu_open = false;
        Ok(())
    }

    /// Marks the item busy or idle. Missing items are ignored since a
    /// successful delete removes the item before the flag is cleared.
    pub fn set_deleting(&mut self, id: &TaskId, deleting: bool) {
        if let Some(item) = self.items.get_mut(id) {
            item.deleting = deleting;
        }
    }

    /// Returns whether the outside-interaction observer is registered,
    /// which is the case exactly while any menu is open.
    #[must_use]
    pub fn observer_active(&self) -> bool {
        self.items.values().any(ItemState::menu_open)
    }

    /// Feeds a pointer interaction to the observer. Interactions outside
    /// every menu region and trigger close all open menus. Returns how many
    /// menus were closed.
    pub fn pointer_down(&mut self, target: &InteractionTarget) -> usize {
        if !self.observer_active() || target.is_menu_region() {
            return 0;
        }
        let mut closed = 0;
        for item in self.items.values_mut().filter(|item| item.menu_open) {
            item.menu_open = false;
            closed += 1;
        }
        closed
    }
}
