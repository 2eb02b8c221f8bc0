//! Shared test utilities for integration tests
//!
//! Environment variables are process-wide, so tests that set `FSTREE_*`
//! variables serialize on a mutex and restore the previous values afterwards.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with the given environment variables set, then restore them.
pub fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = f();

    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(&key, v),
            None => std::env::remove_var(&key),
        }
    }

    result
}

/// root/{a.txt = "hi", b/{c.txt = "c"}}
pub fn scenario_tree(root: &Path) {
    fs::create_dir_all(root.join("b")).unwrap();
    fs::write(root.join("a.txt"), "hi").unwrap();
    fs::write(root.join("b").join("c.txt"), "c").unwrap();
}

pub const SHA256_HI: &str = "8f434346648f6b96df89dda901c5176b10a6d83961dd3c1ac88b59b2dc327aa4";

/// Permission bits currently on disk for `path`
#[cfg(unix)]
pub fn permissions_of(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).unwrap().permissions().mode() & 0o777
}
