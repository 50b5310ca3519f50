//! Persistent storage for the native client.
//!
//! Values are JSON files in the platform config directory:
//!   - Linux: `~/.config/letterwheel/`
//!   - macOS: `~/Library/Application Support/letterwheel/`
//!   - Windows: `%APPDATA%\letterwheel\`
//!
//! The browser build keeps no state of its own: the page's session cookie
//! already identifies the player.

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

const SESSION_ID_KEY: &str = "session_id";

/// Return the persisted session id, creating and saving a fresh one on first
/// use. Falls back to an unsaved id if the config directory is unusable.
pub fn load_or_create_session_id() -> String {
    match config_dir() {
        Some(dir) => load_or_create_session_id_in(&dir),
        None => {
            crate::log_warn!("No config directory; session will not survive a restart");
            new_session_id()
        }
    }
}

pub fn load_or_create_session_id_in(dir: &Path) -> String {
    if let Some(id) = load::<String>(dir, SESSION_ID_KEY) {
        return id;
    }
    let id = new_session_id();
    if !save(dir, SESSION_ID_KEY, &id) {
        crate::log_warn!("Failed to persist session id in {}", dir.display());
    }
    id
}

fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Save a value under `key`. Returns `true` if the operation succeeded.
pub fn save<T: Serialize>(dir: &Path, key: &str, value: &T) -> bool {
    let Ok(json) = serde_json::to_string(value) else {
        return false;
    };
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    std::fs::write(file_path(dir, key), json).is_ok()
}

/// Load the value saved under `key`, if present and readable.
pub fn load<T: DeserializeOwned>(dir: &Path, key: &str) -> Option<T> {
    let json = std::fs::read_to_string(file_path(dir, key)).ok()?;
    serde_json::from_str(&json).ok()
}

fn config_dir() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("letterwheel"))
}

fn file_path(dir: &Path, key: &str) -> PathBuf {
    // Sanitize key to be a valid filename
    let safe_key = key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_");
    dir.join(format!("{}.json", safe_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "letterwheel-test-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn session_id_is_created_once_and_reused() {
        let dir = scratch_dir("session");
        let first = load_or_create_session_id_in(&dir);
        let second = load_or_create_session_id_in(&dir);
        assert_eq!(first, second);
        assert!(uuid::Uuid::parse_str(&first).is_ok());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn keys_are_sanitized() {
        let dir = scratch_dir("keys");
        assert!(save(&dir, "a/b:c", &42u32));
        assert_eq!(load::<u32>(&dir, "a/b:c"), Some(42));
        assert!(dir.join("a_b_c.json").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
