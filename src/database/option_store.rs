use std::collections::HashMap;
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use super::error::{StoreError, StoreResult};

/// Key/value store for gateway options.
///
/// Values are whole JSON documents; `set` replaces the previous value as one
/// unit so readers never observe a partial write.
pub trait OptionStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<JsonValue>>;

    fn set(&self, key: &str, value: JsonValue) -> StoreResult<()>;
}

/// Typed access on top of any [`OptionStore`]
pub trait OptionStoreExt: OptionStore {
    fn get_typed<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| StoreError::Serialization {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn set_typed<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let value = serde_json::to_value(value).map_err(|source| StoreError::Serialization {
            key: key.to_string(),
            source,
        })?;
        self.set(key, value)
    }
}

impl<S: OptionStore + ?Sized> OptionStoreExt for S {}

#[derive(Debug, Default)]
pub struct InMemoryOptionStore {
    options: RwLock<HashMap<String, JsonValue>>,
}

impl InMemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OptionStore for InMemoryOptionStore {
    fn get(&self, key: &str) -> StoreResult<Option<JsonValue>> {
        let options = self
            .options
            .read()
            .map_err(|_| StoreError::LockPoisoned("options"))?;
        Ok(options.get(key).cloned())
    }

    fn set(&self, key: &str, value: JsonValue) -> StoreResult<()> {
        let mut options = self
            .options
            .write()
            .map_err(|_| StoreError::LockPoisoned("options"))?;
        debug!(key = key, "option updated");
        options.insert(key.to_string(), value);
        Ok(())
    }
}
