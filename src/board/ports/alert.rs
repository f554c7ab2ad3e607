//! Port for blocking, user-visible alerts.

/// Surfaces a message the user must acknowledge.
///
/// The board raises alerts only for destructive failures; everything else
/// is logged.
#[cfg_attr(test, mockall::automock)]
pub trait AlertSink: Send + Sync {
    /// Shows `message` to the user.
    fn alert(&self, message: &str);
}
