//! Browser backends: LocalStorage and `navigator.vibrate`

use serde_json::Value;
use wasm_bindgen::JsValue;

use super::{Haptics, KeyValueStore, PlatformError};
use crate::sim::Haptic;

fn js_error(err: JsValue) -> PlatformError {
    PlatformError::Rejected(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// `window.localStorage`, values stored as JSON text
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - progress will not be saved");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, PlatformError> {
        self.storage.as_ref().ok_or(PlatformError::Unavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, PlatformError> {
        match self.storage()?.get_item(key).map_err(js_error)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), PlatformError> {
        let json = serde_json::to_string(&value)?;
        self.storage()?.set_item(key, &json).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), PlatformError> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}

/// `navigator.vibrate`
#[derive(Default)]
pub struct NavigatorHaptics;

impl Haptics for NavigatorHaptics {
    fn vibrate(&mut self, haptic: &Haptic) -> Result<(), PlatformError> {
        let navigator = web_sys::window()
            .ok_or(PlatformError::Unavailable)?
            .navigator();
        let accepted = match haptic {
            Haptic::Pulse(ms) => navigator.vibrate_with_duration(*ms),
            Haptic::Pattern(pattern) => {
                let array = js_sys::Array::new();
                for ms in pattern {
                    array.push(&JsValue::from(*ms));
                }
                navigator.vibrate_with_pattern(&array)
            }
        };
        if accepted {
            Ok(())
        } else {
            Err(PlatformError::Unavailable)
        }
    }
}
