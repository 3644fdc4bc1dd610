//! `localStorage` slot holding one JSON-encoded value, used to persist the anonymous credential
//! across reloads.

use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single keyed `window.localStorage` entry.
pub struct LocalSlot {
    key: String,
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}

impl LocalSlot {
    /// Slot addressed by `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Storage key of this slot.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads and decodes the slot; missing or unreadable entries count as empty.
    pub fn load<T: DeserializeOwned>(&self) -> Option<T> {
        #[cfg(target_arch = "wasm32")]
        {
            let raw = local_storage().ok()?.get_item(&self.key).ok().flatten()?;
            serde_json::from_str(&raw).ok()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    /// Encodes and writes `value` into the slot.
    ///
    /// # Errors
    ///
    /// Returns an error when encoding fails or localStorage rejects the write.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), String> {
        let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;

        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .set_item(&self.key, &raw)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = raw;
            Ok(())
        }
    }

    /// Removes the slot.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage rejects the delete.
    pub fn clear(&self) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .remove_item(&self.key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(())
        }
    }
}
