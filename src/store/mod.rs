pub mod memory;
pub mod participants;
pub mod roles;

pub use memory::MemoryStore;
pub use participants::ParticipantDirectory;
pub use roles::RoleTable;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Collection names used by this subsystem.
pub const ADMINS: &str = "admins";
pub const PARTICIPANTS: &str = "participants";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
    #[error("failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Document store boundary. Mirrors the operations the role subsystem
/// needs from its backing store: per-document atomic upserts and
/// deletes, point reads, single-field equality queries, and full
/// collection scans. No cross-collection transactions.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read by document id. `Ok(None)` means the document does
    /// not exist, which is distinct from a backend failure.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Equality query on a single top-level field, returning
    /// `(id, document)` pairs, capped at `limit` when given.
    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
        limit: Option<usize>,
    ) -> Result<Vec<(String, Value)>, StoreError>;

    /// Upsert: creates the document or replaces it wholesale.
    async fn set(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError>;

    /// Delete by id. Deleting a missing document is a no-op, not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Full scan of a collection as `(id, document)` pairs.
    async fn get_all(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError>;
}
