//! Controller settings.

/// How a failed completion toggle is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TogglePolicy {
    /// Flip locally, confirm in the background, never compensate. Local and
    /// remote state may diverge until the next successful load.
    #[default]
    ApplyThenConfirm,
    /// As above, but restore the previous flag when the confirmation fails
    /// and the local flag still holds the optimistic value.
    RollbackOnFailure,
}

/// Task board controller settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoardConfig {
    /// Treatment of failed completion toggles.
    pub toggle_policy: TogglePolicy,
}

impl BoardConfig {
    /// Creates the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the toggle policy.
    #[must_use]
    pub const fn with_toggle_policy(mut self, toggle_policy: TogglePolicy) -> Self {
        self.toggle_policy = toggle_policy;
        self
    }
}
