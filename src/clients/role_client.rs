use std::collections::HashSet;

use tracing::{debug, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{Role, UserRole};
use crate::user_actor::UserError;

/// Client for the user_roles table. Only admin grants are stored.
#[derive(Clone)]
pub struct RoleClient {
    inner: ResourceClient<UserRole>,
}

impl_client_new!(RoleClient, UserRole);

impl RoleClient {
    #[instrument(skip(self))]
    pub async fn role_of(&self, user_id: &str) -> Result<Role, UserError> {
        debug!("Sending request");
        let row = self.inner.get(user_id.to_string()).await?;
        Ok(row.map(|r| r.role).unwrap_or_default())
    }

    /// Ids of every admin.
    #[instrument(skip(self))]
    pub async fn admin_ids(&self) -> Result<HashSet<String>, UserError> {
        debug!("Sending request");
        let rows = self.inner.list().await?;
        Ok(rows.into_iter().filter(|r| r.role == Role::Admin).map(|r| r.user_id).collect())
    }

    /// Upserts an admin grant, or deletes it when demoting to `User`.
    /// Both directions are idempotent.
    #[instrument(skip(self))]
    pub async fn set_role(&self, user_id: &str, role: Role) -> Result<(), UserError> {
        debug!("Sending request");
        match role {
            Role::Admin => {
                let grant = UserRole { user_id: user_id.to_string(), role: Role::Admin };
                match self.inner.create(grant).await {
                    Ok(_) => {}
                    Err(FrameworkError::Duplicate { .. }) => {
                        self.inner.update(user_id.to_string(), Role::Admin).await?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Role::User => match self.inner.delete(user_id.to_string()).await {
                Ok(()) | Err(FrameworkError::NotFound { .. }) => {}
                Err(e) => return Err(e.into()),
            },
        }
        info!(role = ?role, "Role updated");
        Ok(())
    }
}
