use crate::store::{RoleTable, StoreError};

use super::AdminLevel;

/// Resolves a user id to an admin level from two sources with
/// asymmetric trust: the environment-configured bootstrap owner, then
/// the persisted role table. The two are deliberately never merged
/// into one lookup.
pub struct RoleResolver {
    bootstrap_owner: Option<String>,
    roles: RoleTable,
}

impl RoleResolver {
    pub fn new(bootstrap_owner: Option<String>, roles: RoleTable) -> Self {
        Self {
            bootstrap_owner,
            roles,
        }
    }

    /// True iff this user id is the deployment's bootstrap owner.
    /// Owner grants hinge on this check, never on a resolved level.
    pub fn is_bootstrap(&self, user_id: &str) -> bool {
        self.bootstrap_owner.as_deref() == Some(user_id)
    }

    /// Ids that hold the owner level: the bootstrap identity plus any
    /// legacy table rows tagged owner. The latter never resolve to
    /// owner; listings surface them so UIs can exclude them from
    /// assignable targets.
    pub async fn owner_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut owners: Vec<String> = self.bootstrap_owner.iter().cloned().collect();
        for record in self.roles.all().await? {
            if record.role == AdminLevel::Owner && !owners.contains(&record.user_id) {
                owners.push(record.user_id);
            }
        }
        Ok(owners)
    }

    /// Map a user id to an admin level.
    ///
    /// The bootstrap identity short-circuits to owner before any table
    /// lookup, so no stored record can shadow it. Table rows only ever
    /// grant super_admin or event_admin; a stored owner row is treated
    /// as not-an-admin since only the bootstrap mechanism may grant
    /// owner.
    pub async fn resolve_level(&self, user_id: &str) -> Result<Option<AdminLevel>, StoreError> {
        if self.is_bootstrap(user_id) {
            return Ok(Some(AdminLevel::Owner));
        }

        match self.roles.get(user_id).await? {
            Some(record)
                if matches!(record.role, AdminLevel::SuperAdmin | AdminLevel::EventAdmin) =>
            {
                Ok(Some(record.role))
            }
            Some(record) => {
                tracing::warn!(
                    "ignoring table-stored '{}' role for user '{}'",
                    record.role,
                    user_id
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }
}
