use chrono::Utc;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::RoleRecord;
use crate::store::{ParticipantDirectory, RoleTable};

use super::{AdminContext, AdminLevel, RoleResolver};
use std::sync::Arc;

/// Result of a role mutation.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SetRoleOutcome {
    Granted { record: RoleRecord },
    Revoked { user_id: String },
}

/// Visibility-filtered listing plus the owner id set, so callers can
/// exclude owners from assignable-target lists.
#[derive(Debug, Serialize)]
pub struct RoleListing {
    pub roles: Vec<RoleRecord>,
    pub owners: Vec<String>,
}

/// Escalation and visibility rules for the role table. All writes to
/// the admins collection go through `set_role`; nothing else in the
/// service mutates it.
pub struct RolePolicy {
    resolver: Arc<RoleResolver>,
    roles: RoleTable,
    participants: ParticipantDirectory,
}

impl RolePolicy {
    pub fn new(
        resolver: Arc<RoleResolver>,
        roles: RoleTable,
        participants: ParticipantDirectory,
    ) -> Self {
        Self {
            resolver,
            roles,
            participants,
        }
    }

    /// Grant (`Some(level)`) or revoke (`None`) the target's role.
    ///
    /// Escalation rules:
    /// - owner may only be granted by the bootstrap identity, checked
    ///   by id rather than level so a stray table-stored owner row can
    ///   never mint owners;
    /// - super_admin may only be granted by an owner;
    /// - event_admin may be granted by owner or super_admin;
    /// - a super_admin actor may only ever touch records that are
    ///   currently event_admin (or absent).
    ///
    /// Revoking an absent record succeeds as a no-op delete.
    pub async fn set_role(
        &self,
        actor: &AdminContext,
        target_user_id: &str,
        new_role: Option<AdminLevel>,
    ) -> Result<SetRoleOutcome, ApiError> {
        self.check_escalation(actor, new_role)?;

        if actor.level == AdminLevel::SuperAdmin {
            // Write ceiling: a super_admin may not overwrite or revoke
            // anything above event_admin.
            if let Some(existing) = self.roles.get(target_user_id).await? {
                if existing.role != AdminLevel::EventAdmin {
                    return Err(ApiError::forbidden(
                        "Super admins can only manage event admin roles",
                    ));
                }
            }
        }

        // Referential check against the registration system. Races with
        // participant deletion are benign: an orphan role record still
        // only matches this exact user id.
        let participant = self
            .participants
            .get(target_user_id)
            .await?
            .ok_or_else(|| ApiError::bad_request("User is not a participant"))?;

        match new_role {
            Some(role) => {
                let record = RoleRecord {
                    user_id: target_user_id.to_string(),
                    role,
                    full_name: participant.full_name,
                    email: participant.email,
                    added_by: actor.user_id.clone(),
                    added_at: Utc::now(),
                };
                self.roles.upsert(&record).await?;
                tracing::info!(
                    "role '{}' granted to '{}' by '{}'",
                    role,
                    target_user_id,
                    actor.user_id
                );
                Ok(SetRoleOutcome::Granted { record })
            }
            None => {
                self.roles.delete(target_user_id).await?;
                tracing::info!("role revoked for '{}' by '{}'", target_user_id, actor.user_id);
                Ok(SetRoleOutcome::Revoked {
                    user_id: target_user_id.to_string(),
                })
            }
        }
    }

    fn check_escalation(
        &self,
        actor: &AdminContext,
        new_role: Option<AdminLevel>,
    ) -> Result<(), ApiError> {
        match new_role {
            Some(AdminLevel::Owner) => {
                if !self.resolver.is_bootstrap(&actor.user_id) {
                    return Err(ApiError::forbidden("Only the bootstrap owner can assign owner"));
                }
            }
            Some(AdminLevel::SuperAdmin) => {
                if actor.level != AdminLevel::Owner {
                    return Err(ApiError::forbidden("Only owner can assign super_admin"));
                }
            }
            Some(AdminLevel::EventAdmin) | None => {
                if !matches!(actor.level, AdminLevel::Owner | AdminLevel::SuperAdmin) {
                    return Err(ApiError::forbidden(
                        "Only owner or super_admin can manage roles",
                    ));
                }
            }
        }
        Ok(())
    }

    /// List role records the actor may see. Owners see the whole
    /// table; super_admins see only event_admin rows, so they cannot
    /// observe other super_admins or legacy owner rows.
    pub async fn list_roles(&self, actor: &AdminContext) -> Result<RoleListing, ApiError> {
        let records = self.roles.all().await?;

        let roles = match actor.level {
            AdminLevel::Owner => records,
            AdminLevel::SuperAdmin => records
                .into_iter()
                .filter(|r| r.role == AdminLevel::EventAdmin)
                .collect(),
            AdminLevel::EventAdmin => {
                return Err(ApiError::forbidden("Only owner or super_admin can list roles"));
            }
        };

        let owners = self.resolver.owner_ids().await?;
        Ok(RoleListing { roles, owners })
    }
}
