//! Infrastructure implementation of the `Environment` port over the real
//! process environment.

use crate::application::ports::Environment;

/// The environment of the running `envmanager` process.
///
/// Mutations are visible to this process and to children it spawns
/// afterwards, never to the parent shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    #[allow(unsafe_code)]
    fn set(&self, key: &str, value: &str) {
        // SAFETY: the binary runs on a current-thread runtime and no other
        // thread reads or writes the environment.
        unsafe { std::env::set_var(key, value) };
    }

    #[allow(unsafe_code)]
    fn unset(&self, key: &str) {
        // SAFETY: see `set`.
        unsafe { std::env::remove_var(key) };
    }

    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}
