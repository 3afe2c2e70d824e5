//! LocalStorage access

use web_sys::Storage;

fn local_storage() -> Option<Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Read a value; `None` if storage is unavailable or the key is unset
pub fn get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

/// Write a value
pub fn set(key: &str, value: &str) -> Result<(), String> {
    let storage = local_storage().ok_or_else(|| "LocalStorage unavailable".to_string())?;
    storage
        .set_item(key, value)
        .map_err(|e| format!("{e:?}"))
}
