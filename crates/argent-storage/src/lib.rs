//! Storage abstraction for argent.
//!
//! Backend crates (argent-store-mongo, argent-store-memory) implement the
//! [`RecordStore`] trait so the terminal app doesn't depend on any specific
//! database engine or wire format.
//!
//! The model is one document per (domain, user) pair: a caller-supplied
//! identifier plus an open, insertion-ordered mapping of text field names to
//! text values. Merges are field-by-field with last-write-wins semantics and
//! no transaction spanning multiple fields.

use indexmap::IndexMap;
use thiserror::Error;

/// Uniform error type for all storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record does not exist. Only raised where a record is a
    /// precondition (`set_field`); plain lookups report absence as `None`.
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("backend error: {0}")]
    Backend(String),
}

/// The external user identifier. Never generated by a backend; within a
/// domain collection it is the unique record key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// The three data domains, each backed by its own collection. The same user
/// identifier may own one independent record per domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    Profile,
    ToDo,
    Inventory,
}

impl Domain {
    /// Collection name within the backing database namespace.
    pub fn collection_name(self) -> &'static str {
        match self {
            Domain::Profile => "users_details",
            Domain::ToDo => "to_do_lists",
            Domain::Inventory => "inventory",
        }
    }
}

/// The per-user, per-domain document: an identifier plus an open field
/// mapping. Field order is the order fields were first written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub fields: IndexMap<String, String>,
}

impl UserRecord {
    /// An empty record for `id`, as created on first access in a domain.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            fields: IndexMap::new(),
        }
    }

    /// Merge a single field, overwriting any prior value for that name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// The record merge protocol backends implement.
///
/// Every mutation persists immediately; there is no transaction spanning
/// multiple `set_field` calls. The model assumes one writer per record at a
/// time, so concurrent sessions for the same user race (last write wins).
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up the record for (domain, user); create an empty one if absent.
    /// Idempotent: calling twice never duplicates or loses fields.
    async fn ensure_exists(
        &self,
        domain: Domain,
        user: &UserId,
    ) -> Result<UserRecord, StoreError>;

    /// Merge one field into an existing record, last-write-wins.
    /// The record must already exist (`ensure_exists` first), otherwise
    /// `StoreError::NotFound`.
    async fn set_field(
        &self,
        domain: Domain,
        user: &UserId,
        name: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Remove the entire record. Deleting an absent record is not an error.
    async fn delete_record(&self, domain: Domain, user: &UserId) -> Result<(), StoreError>;

    /// Point lookup; `None` means no record exists in this domain.
    async fn read_record(
        &self,
        domain: Domain,
        user: &UserId,
    ) -> Result<Option<UserRecord>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_are_fixed() {
        assert_eq!(Domain::Profile.collection_name(), "users_details");
        assert_eq!(Domain::ToDo.collection_name(), "to_do_lists");
        assert_eq!(Domain::Inventory.collection_name(), "inventory");
    }

    #[test]
    fn record_merge_is_last_write_wins() {
        let mut record = UserRecord::new(UserId::new("alice"));
        record.set("task1", "buy milk");
        record.set("task2", "walk dog");
        record.set("task1", "buy oat milk");

        assert_eq!(record.get("task1"), Some("buy oat milk"));
        assert_eq!(record.get("task2"), Some("walk dog"));
        assert_eq!(record.fields.len(), 2);
    }

    #[test]
    fn record_preserves_first_write_order() {
        let mut record = UserRecord::new(UserId::new("alice"));
        record.set("z_last", "1");
        record.set("a_first", "2");
        record.set("z_last", "3"); // overwrite must not reorder

        let keys: Vec<_> = record.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z_last", "a_first"]);
    }

    // Tiny compile-time smoke test for trait object usage.
    struct NoopStore;

    #[async_trait::async_trait]
    impl RecordStore for NoopStore {
        async fn ensure_exists(
            &self,
            _domain: Domain,
            user: &UserId,
        ) -> Result<UserRecord, StoreError> {
            Ok(UserRecord::new(user.clone()))
        }

        async fn set_field(
            &self,
            _domain: Domain,
            _user: &UserId,
            _name: &str,
            _value: &str,
        ) -> Result<(), StoreError> {
            Err(StoreError::NotFound)
        }

        async fn delete_record(&self, _domain: Domain, _user: &UserId) -> Result<(), StoreError> {
            Ok(())
        }

        async fn read_record(
            &self,
            _domain: Domain,
            _user: &UserId,
        ) -> Result<Option<UserRecord>, StoreError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn trait_smoke() {
        let store: Box<dyn RecordStore> = Box::new(NoopStore);
        let user = UserId::new("alice");

        let record = store.ensure_exists(Domain::ToDo, &user).await.unwrap();
        assert_eq!(record.id, user);
        assert!(record.fields.is_empty());

        assert!(matches!(
            store.set_field(Domain::ToDo, &user, "k", "v").await,
            Err(StoreError::NotFound)
        ));
        assert!(store.read_record(Domain::ToDo, &user).await.unwrap().is_none());
    }
}
