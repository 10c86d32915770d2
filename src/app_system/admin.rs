//! Role checks and user administration.

use tracing::{info, instrument, warn};

use super::Marketplace;
use crate::auth::Session;
use crate::domain::{Role, UserSummary};
use crate::error::{AppError, AppResult};

impl Marketplace {
    pub async fn is_admin(&self, user_id: &str) -> AppResult<bool> {
        Ok(self.roles.role_of(user_id).await? == Role::Admin)
    }

    pub(crate) async fn require_admin(&self, session: &Session) -> AppResult<()> {
        if !self.is_admin(&session.user_id).await? {
            warn!(user_id = %session.user_id, "Admin access refused");
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(())
    }

    /// Every profile with its admin flag, ordered by name.
    #[instrument(skip(self, session), fields(admin_id = %session.user_id))]
    pub async fn list_users(&self, session: &Session) -> AppResult<Vec<UserSummary>> {
        self.require_admin(session).await?;
        let admins = self.roles.admin_ids().await?;
        let profiles = self.profiles.list_profiles().await?;
        Ok(profiles
            .into_iter()
            .map(|profile| UserSummary { is_admin: admins.contains(&profile.id), profile })
            .collect())
    }

    /// Grants or revokes admin. Setting the role a user already has is a no-op.
    #[instrument(skip(self, session), fields(admin_id = %session.user_id))]
    pub async fn set_role(&self, session: &Session, user_id: &str, role: Role) -> AppResult<()> {
        self.require_admin(session).await?;
        if self.profiles.get_profile(user_id.to_string()).await?.is_none() {
            return Err(AppError::NotFound(format!("User {}", user_id)));
        }
        self.roles.set_role(user_id, role).await?;
        info!(user_id, role = ?role, "Role changed");
        Ok(())
    }
}
