use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Account, AccountCreate, Profile, ProfileCreate, ProfileUpdate};
use crate::user_actor::UserError;

/// Client for the profiles table.
#[derive(Clone)]
pub struct ProfileClient {
    inner: ResourceClient<Profile>,
}

impl_basic_client!(ProfileClient, Profile, UserError, profile);

impl ProfileClient {
    #[instrument(skip(self, params), fields(user_id = %params.id))]
    pub async fn create_profile(&self, params: ProfileCreate) -> Result<Profile, UserError> {
        debug!("Sending request");
        let profile = self.inner.create(params).await?;
        info!("Profile created");
        Ok(profile)
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        id: String,
        update: ProfileUpdate,
    ) -> Result<Profile, UserError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    /// All profiles ordered by full name.
    #[instrument(skip(self))]
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, UserError> {
        debug!("Sending request");
        let mut profiles = self.inner.list().await?;
        profiles.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(profiles)
    }
}

/// Client for the credentials table.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
}

impl_basic_client!(AccountClient, Account, UserError, account);

impl AccountClient {
    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn create_account(&self, params: AccountCreate) -> Result<Account, UserError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    /// Looks an account up by email, ignoring case.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, UserError> {
        debug!("Sending request");
        let accounts = self.inner.list().await?;
        Ok(accounts.into_iter().find(|a| a.email.eq_ignore_ascii_case(email)))
    }
}
