use std::sync::Arc;

use crate::models::RoleRecord;

use super::{DocumentStore, StoreError, ADMINS};

/// Typed view over the admins collection. Documents are keyed by user
/// id, which is what keeps the one-record-per-user invariant: a grant
/// is always an upsert of the same document.
#[derive(Clone)]
pub struct RoleTable {
    store: Arc<dyn DocumentStore>,
}

impl RoleTable {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch the role record for a user. A document that no longer
    /// deserializes (legacy rows with a role value this service never
    /// wrote) is logged and reported as absent rather than failing the
    /// request.
    pub async fn get(&self, user_id: &str) -> Result<Option<RoleRecord>, StoreError> {
        let Some(doc) = self.store.get(ADMINS, user_id).await? else {
            return Ok(None);
        };

        match serde_json::from_value::<RoleRecord>(doc) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!("ignoring unreadable role record for user '{}': {}", user_id, e);
                Ok(None)
            }
        }
    }

    pub async fn upsert(&self, record: &RoleRecord) -> Result<(), StoreError> {
        let fields = serde_json::to_value(record)?;
        self.store.set(ADMINS, &record.user_id, fields).await
    }

    pub async fn delete(&self, user_id: &str) -> Result<(), StoreError> {
        self.store.delete(ADMINS, user_id).await
    }

    /// Every readable record in the table. Unreadable legacy rows are
    /// skipped with a warning, same as `get`.
    pub async fn all(&self) -> Result<Vec<RoleRecord>, StoreError> {
        let docs = self.store.get_all(ADMINS).await?;
        let mut records = Vec::with_capacity(docs.len());
        for (id, doc) in docs {
            match serde_json::from_value::<RoleRecord>(doc) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("skipping unreadable role record '{}': {}", id, e),
            }
        }
        Ok(records)
    }
}
