//! Scoped environment overrides for integration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Applies environment changes and restores the previous values on drop.
///
/// Holding the guard also holds a process-wide lock, so tests that touch
/// the environment run one at a time.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets each `(key, Some(value))` and removes each `(key, None)`.
    pub fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let previous = changes
            .iter()
            .map(|(key, value)| {
                let saved = (OsString::from(key), env::var_os(key));
                write_var(key, *value);
                saved
            })
            .collect();

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}

fn write_var(key: &str, value: Option<&str>) {
    unsafe {
        // SAFETY: the global mutex serializes environment mutations in tests.
        match value {
            Some(new_value) => env::set_var(key, new_value),
            None => env::remove_var(key),
        }
    }
}
