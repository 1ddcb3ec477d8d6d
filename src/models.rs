use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::authz::AdminLevel;

/// Persisted admin role assignment. At most one record exists per user;
/// the record id in the admins collection is the user id itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecord {
    pub user_id: String,
    pub role: AdminLevel,
    /// Snapshot of the participant's name at assignment time.
    pub full_name: Option<String>,
    /// Snapshot of the participant's email at assignment time.
    pub email: Option<String>,
    pub added_by: String,
    pub added_at: DateTime<Utc>,
}

/// Participant profile owned by the registration system. This service
/// only reads the fields it denormalizes into role records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
