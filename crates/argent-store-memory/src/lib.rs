//! In-memory record store.
//!
//! This implementation is suitable for:
//! - Development without a reachable document database (`--db-url memory:`)
//! - Session-flow tests that need a real store with scripted state
//!
//! Records live only for the lifetime of the process. The observable merge
//! semantics are identical to the Mongo backend: find-or-create, one field
//! at a time, last write wins.

use argent_storage::{Domain, RecordStore, StoreError, UserId, UserRecord};
use async_trait::async_trait;
use dashmap::DashMap;
use indexmap::IndexMap;

/// In-process [`RecordStore`] keyed by (domain, user).
#[derive(Default)]
pub struct MemoryStore {
    records: DashMap<(Domain, UserId), IndexMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ensure_exists(
        &self,
        domain: Domain,
        user: &UserId,
    ) -> Result<UserRecord, StoreError> {
        let fields = self
            .records
            .entry((domain, user.clone()))
            .or_default()
            .clone();
        Ok(UserRecord {
            id: user.clone(),
            fields,
        })
    }

    async fn set_field(
        &self,
        domain: Domain,
        user: &UserId,
        name: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        match self.records.get_mut(&(domain, user.clone())) {
            Some(mut fields) => {
                fields.insert(name.to_string(), value.to_string());
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete_record(&self, domain: Domain, user: &UserId) -> Result<(), StoreError> {
        self.records.remove(&(domain, user.clone()));
        Ok(())
    }

    async fn read_record(
        &self,
        domain: Domain,
        user: &UserId,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.records.get(&(domain, user.clone())).map(|fields| {
            UserRecord {
                id: user.clone(),
                fields: fields.clone(),
            }
        }))
    }
}
