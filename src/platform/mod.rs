//! Platform abstraction layer
//!
//! The game talks to the outside world through three narrow collaborators:
//! - `KeyValueStore`: JSON values by key (LocalStorage on web, memory natively)
//! - `Haptics`: best-effort vibration
//! - `AdProvider`: interstitial and rewarded ads
//!
//! Every call returns `Result<_, PlatformError>`. Callers are expected to log
//! and carry on; nothing here may stall or crash a session.

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::sim::Haptic;

/// Collaborator failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Backend missing (no window, storage disabled, API unsupported)
    Unavailable,
    /// Value could not be encoded or decoded
    Serialization(String),
    /// Backend refused the request
    Rejected(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Unavailable => write!(f, "platform service unavailable"),
            PlatformError::Serialization(msg) => write!(f, "serialization failed: {}", msg),
            PlatformError::Rejected(msg) => write!(f, "request rejected: {}", msg),
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<serde_json::Error> for PlatformError {
    fn from(err: serde_json::Error) -> Self {
        PlatformError::Serialization(err.to_string())
    }
}

/// Persistent key-value storage of JSON values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PlatformError>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), PlatformError>;
    fn remove(&mut self, key: &str) -> Result<(), PlatformError>;
}

/// Read and decode `key`; `Ok(None)` when nothing is stored
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, PlatformError> {
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Encode and write `value` under `key`
pub fn save_json<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PlatformError> {
    store.set(key, serde_json::to_value(value)?)
}

/// Device vibration
pub trait Haptics {
    fn vibrate(&mut self, haptic: &Haptic) -> Result<(), PlatformError>;
}

/// Ad network
pub trait AdProvider {
    /// Show a full-screen ad; returns once it has been dismissed
    fn show_interstitial(&mut self) -> Result<(), PlatformError>;
    /// Show a rewarded ad; `Ok(true)` only if the reward was earned
    fn show_rewarded(&mut self) -> Result<bool, PlatformError>;
}

/// In-process store (native builds and tests)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PlatformError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), PlatformError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PlatformError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Storage that is never there (private browsing, disabled storage)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStorage;

impl KeyValueStore for NoStorage {
    fn get(&self, _key: &str) -> Result<Option<Value>, PlatformError> {
        Err(PlatformError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: Value) -> Result<(), PlatformError> {
        Err(PlatformError::Unavailable)
    }

    fn remove(&mut self, _key: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Unavailable)
    }
}

/// Devices without a vibration motor
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&mut self, _haptic: &Haptic) -> Result<(), PlatformError> {
        Err(PlatformError::Unavailable)
    }
}

/// Placeholder ad network: logs and dismisses immediately
#[derive(Debug, Clone, Copy)]
pub struct StubAds {
    /// Whether rewarded ads pay out
    pub grant_rewards: bool,
}

impl Default for StubAds {
    fn default() -> Self {
        Self {
            grant_rewards: true,
        }
    }
}

impl AdProvider for StubAds {
    fn show_interstitial(&mut self) -> Result<(), PlatformError> {
        log::info!("[ads] interstitial shown and dismissed");
        Ok(())
    }

    fn show_rewarded(&mut self) -> Result<bool, PlatformError> {
        log::info!("[ads] rewarded ad finished, granted={}", self.grant_rewards);
        Ok(self.grant_rewards)
    }
}
