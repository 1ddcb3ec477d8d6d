use std::sync::Arc;

use crate::models::Participant;

use super::{DocumentStore, StoreError, PARTICIPANTS};

/// Read-only view over the participants collection, which is owned by
/// the registration system. Role assignment only needs an existence
/// check plus the name/email snapshot.
#[derive(Clone)]
pub struct ParticipantDirectory {
    store: Arc<dyn DocumentStore>,
}

impl ParticipantDirectory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<Participant>, StoreError> {
        let Some(doc) = self.store.get(PARTICIPANTS, user_id).await? else {
            return Ok(None);
        };

        match serde_json::from_value::<Participant>(doc) {
            Ok(participant) => Ok(Some(participant)),
            Err(e) => {
                // A participant document we cannot read still proves the
                // participant exists; keep the id and drop the snapshot.
                tracing::warn!("partial participant document for '{}': {}", user_id, e);
                Ok(Some(Participant {
                    user_id: user_id.to_string(),
                    full_name: None,
                    email: None,
                }))
            }
        }
    }
}
