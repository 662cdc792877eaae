//! Persistence of the single authenticated identity.

use std::sync::Arc;

use tracing::{debug, warn};

use super::kv::KeyValueStore;
use crate::entities::Identity;
use crate::types::StoreError;

/// A named slot holding at most one serialized [`Identity`].
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    slot: String,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn save(&self, identity: &Identity) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(identity)?;
        self.store.set(&self.slot, &encoded)?;
        debug!(user = %identity.id, slot = %self.slot, "persisted session");
        Ok(())
    }

    /// Read the slot, reporting malformed contents instead of hiding them.
    pub fn try_load(&self) -> Result<Option<Identity>, StoreError> {
        let Some(raw) = self.store.get(&self.slot)? else {
            return Ok(None);
        };

        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Read the slot. Malformed contents are removed and treated as no session.
    pub fn load(&self) -> Option<Identity> {
        match self.try_load() {
            Ok(identity) => identity,
            Err(StoreError::Malformed(error)) => {
                warn!(slot = %self.slot, %error, "discarding malformed session");
                if let Err(error) = self.store.remove(&self.slot) {
                    warn!(slot = %self.slot, %error, "failed to remove malformed session");
                }
                None
            }
            Err(error) => {
                warn!(slot = %self.slot, %error, "failed to read session");
                None
            }
        }
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(&self.slot)
    }
}
