//! MongoDB record store.
//!
//! One database, three fixed-name collections (one per [`Domain`]). Each
//! record is a plain document `{_id: <user>, <field>: <value>, ...}` with
//! string values and no server-side schema; merges go through `$set` so
//! unrelated fields are never replaced.

use argent_storage::{Domain, RecordStore, StoreError, UserId, UserRecord};
use async_trait::async_trait;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Collection, Database};
use tracing::debug;

/// Database namespace holding all three domain collections.
pub const DATABASE_NAME: &str = "argent";

pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect with a MongoDB connection string and ping the cluster, so an
    /// unreachable store fails here rather than on the first session
    /// operation.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await.map_err(classify)?;
        let db = client.database(DATABASE_NAME);
        db.run_command(doc! { "ping": 1 }).await.map_err(classify)?;
        debug!(database = DATABASE_NAME, "connected to document store");
        Ok(Self { db })
    }

    fn collection(&self, domain: Domain) -> Collection<Document> {
        self.db.collection(domain.collection_name())
    }
}

#[async_trait]
impl RecordStore for MongoStore {
    async fn ensure_exists(
        &self,
        domain: Domain,
        user: &UserId,
    ) -> Result<UserRecord, StoreError> {
        let coll = self.collection(domain);
        if let Some(found) = coll
            .find_one(doc! { "_id": user.0.as_str() })
            .await
            .map_err(classify)?
        {
            return Ok(record_from_document(found));
        }

        debug!(collection = domain.collection_name(), user = %user.0, "creating record");
        coll.insert_one(doc! { "_id": user.0.as_str() })
            .await
            .map_err(classify)?;
        Ok(UserRecord::new(user.clone()))
    }

    async fn set_field(
        &self,
        domain: Domain,
        user: &UserId,
        name: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let mut set = Document::new();
        set.insert(name, value);

        let result = self
            .collection(domain)
            .update_one(doc! { "_id": user.0.as_str() }, doc! { "$set": set })
            .await
            .map_err(classify)?;

        // No upsert: set_field's precondition is an existing record.
        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        debug!(collection = domain.collection_name(), user = %user.0, field = name, "merged field");
        Ok(())
    }

    async fn delete_record(&self, domain: Domain, user: &UserId) -> Result<(), StoreError> {
        self.collection(domain)
            .delete_one(doc! { "_id": user.0.as_str() })
            .await
            .map_err(classify)?;
        debug!(collection = domain.collection_name(), user = %user.0, "deleted record");
        Ok(())
    }

    async fn read_record(
        &self,
        domain: Domain,
        user: &UserId,
    ) -> Result<Option<UserRecord>, StoreError> {
        let found = self
            .collection(domain)
            .find_one(doc! { "_id": user.0.as_str() })
            .await
            .map_err(classify)?;
        Ok(found.map(record_from_document))
    }
}

fn classify(err: mongodb::error::Error) -> StoreError {
    use mongodb::error::ErrorKind;
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

fn record_from_document(document: Document) -> UserRecord {
    let id = document.get_str("_id").unwrap_or_default().to_string();
    let mut record = UserRecord::new(UserId::new(id));
    for (key, value) in document {
        if key == "_id" {
            continue;
        }
        record.set(key, text_value(value));
    }
    record
}

// This client only writes strings; anything else predates it and is rendered
// through Display.
fn text_value(value: Bson) -> String {
    match value {
        Bson::String(s) => s,
        other => other.to_string(),
    }
}
