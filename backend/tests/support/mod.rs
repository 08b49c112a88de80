//! Shared helpers for integration tests.

use std::sync::Mutex;

/// Variables the repository factory and CSV config read.
pub const REPOSITORY_ENV: [&str; 3] = ["REPOSITORY_TYPE", "AIRQ_LOCATIONS_CSV", "AIRQ_READINGS_CSV"];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with some environment variables set (`Some`) or removed (`None`).
///
/// Calls are serialized because the environment is process-global and tests
/// run in parallel. Previous values are restored when `f` returns or panics.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::apply(changes);
    f()
}

struct EnvRestore {
    saved: Vec<(String, Option<String>)>,
}

impl EnvRestore {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let mut saved: Vec<(String, Option<String>)> = Vec::new();
        for (key, value) in changes {
            if !saved.iter().any(|(k, _)| k == key) {
                saved.push((key.to_string(), std::env::var(key).ok()));
            }
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        Self { saved }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            match value {
                Some(v) => std::env::set_var(&key, v),
                None => std::env::remove_var(&key),
            }
        }
    }
}
