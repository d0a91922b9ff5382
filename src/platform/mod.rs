//! Platform abstraction
//!
//! Everything the crate needs from the host environment: wall-clock
//! milliseconds and a string key/value blob store. On wasm32 the store
//! is browser LocalStorage; on native it is one JSON file per key in a
//! data directory. All failures degrade to `None`/no-op with a log
//! line, never an error the kernel could see.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

/// Wall-clock milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Wall-clock milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

/// Read a blob from persistent storage
#[cfg(target_arch = "wasm32")]
pub fn storage_get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

/// Write a blob to persistent storage
#[cfg(target_arch = "wasm32")]
pub fn storage_set(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage write failed for key {key}");
        }
    }
}

/// Remove a blob from persistent storage
#[cfg(target_arch = "wasm32")]
pub fn storage_remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read a blob from persistent storage
#[cfg(not(target_arch = "wasm32"))]
pub fn storage_get(key: &str) -> Option<String> {
    match std::fs::read_to_string(key_path(key)) {
        Ok(data) => Some(data),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            log::warn!("storage read failed for key {key}: {err}");
            None
        }
    }
}

/// Write a blob to persistent storage
#[cfg(not(target_arch = "wasm32"))]
pub fn storage_set(key: &str, value: &str) {
    let path = key_path(key);
    if let Some(parent) = path.parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            log::warn!("storage dir create failed: {err}");
            return;
        }
    }
    if let Err(err) = std::fs::write(&path, value) {
        log::warn!("storage write failed for key {key}: {err}");
    }
}

/// Remove a blob from persistent storage
#[cfg(not(target_arch = "wasm32"))]
pub fn storage_remove(key: &str) {
    let _ = std::fs::remove_file(key_path(key));
}

/// One JSON file per key, under `SCRAP_RUNNER_DATA_DIR` or the cwd
#[cfg(not(target_arch = "wasm32"))]
fn key_path(key: &str) -> PathBuf {
    let dir = std::env::var("SCRAP_RUNNER_DATA_DIR").unwrap_or_else(|_| ".".into());
    PathBuf::from(dir).join(format!("{key}.json"))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        assert!(storage_get("no-such-key-for-tests").is_none());
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let dir = std::env::temp_dir().join("scrap-runner-storage-test");
        // Single-threaded per test binary is not guaranteed, so scope
        // the env var to a unique key instead of relying on isolation.
        unsafe { std::env::set_var("SCRAP_RUNNER_DATA_DIR", &dir) };
        let key = format!("blob-{}", std::process::id());
        storage_set(&key, "{\"v\":1}");
        assert_eq!(storage_get(&key).as_deref(), Some("{\"v\":1}"));
        storage_remove(&key);
        assert!(storage_get(&key).is_none());
    }
}
