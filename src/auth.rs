//! Email + password authentication.
//!
//! Accounts hold Argon2 hashes; every account has a profile with the same id.
//! A successful sign-up or sign-in returns a [`Session`] that callers pass
//! explicitly to the operations that need the acting user.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

use crate::clients::{AccountClient, ProfileClient};
use crate::domain::{AccountCreate, ProfileCreate};
use crate::user_actor::UserError;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("An account already exists for {0}")]
    EmailTaken(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    User(#[from] UserError),
}

/// The acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
}

/// Sign-up form, with the college already resolved to a name.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub mobile_number: String,
    pub college: Option<String>,
}

#[instrument(skip(password))]
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    if password.is_empty() {
        return Err(AuthError::Validation("Password cannot be empty".to_string()));
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "Argon2 password hashing failed");
            AuthError::Hashing(e.to_string())
        })
}

#[instrument(skip(stored_hash, password))]
pub fn verify_password(stored_hash: &str, password: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Hashing(e.to_string())),
    }
}

#[derive(Clone)]
pub struct AuthService {
    accounts: AccountClient,
    profiles: ProfileClient,
    current: Arc<RwLock<Option<Session>>>,
}

impl AuthService {
    pub fn new(accounts: AccountClient, profiles: ProfileClient) -> Self {
        Self { accounts, profiles, current: Arc::new(RwLock::new(None)) }
    }

    /// Creates the account and its profile, then signs the new user in.
    /// If the profile cannot be created the account is removed again.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn sign_up(&self, form: SignUp) -> Result<Session, AuthError> {
        let email = form.email.trim().to_lowercase();
        validate_sign_up(&email, &form)?;

        if self.accounts.find_by_email(&email).await?.is_some() {
            warn!("Sign-up refused: email already registered");
            return Err(AuthError::EmailTaken(email));
        }

        let password_hash = hash_password(&form.password)?;
        let account = match self
            .accounts
            .create_account(AccountCreate { email: email.clone(), password_hash })
            .await
        {
            Ok(account) => account,
            Err(UserError::AlreadyExists(_)) => {
                warn!("Sign-up refused: email registered concurrently");
                return Err(AuthError::EmailTaken(email));
            }
            Err(e) => return Err(e.into()),
        };

        let profile = ProfileCreate {
            id: account.id.clone(),
            full_name: form.full_name.trim().to_string(),
            mobile_number: form.mobile_number.trim().to_string(),
            college: form.college,
            email: email.clone(),
        };
        if let Err(e) = self.profiles.create_profile(profile).await {
            error!(error = %e, user_id = %account.id, "Profile creation failed, removing account");
            if let Err(rollback) = self.accounts.delete_account(account.id.clone()).await {
                error!(error = %rollback, "Account rollback failed");
            }
            return Err(e.into());
        }

        info!(user_id = %account.id, "Account created");
        let session = Session { user_id: account.id, email };
        *self.current.write().await = Some(session.clone());
        Ok(session)
    }

    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim().to_lowercase();
        let Some(account) = self.accounts.find_by_email(&email).await? else {
            debug!("Unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(&account.password_hash, password)? {
            warn!(user_id = %account.id, "Wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %account.id, "Signed in");
        let session = Session { user_id: account.id, email: account.email };
        *self.current.write().await = Some(session.clone());
        Ok(session)
    }

    /// Ends the session. Signing out a session that is not current is a no-op.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        let mut current = self.current.write().await;
        match current.as_ref() {
            Some(active) if active == session => {
                *current = None;
                info!("Signed out");
                Ok(())
            }
            Some(_) => Ok(()),
            None => Err(AuthError::NotSignedIn),
        }
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.current.read().await.clone()
    }
}

fn validate_sign_up(email: &str, form: &SignUp) -> Result<(), AuthError> {
    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::Validation("A valid email is required".to_string()));
    }
    if form.password.len() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if form.full_name.trim().is_empty() || form.mobile_number.trim().is_empty() {
        return Err(AuthError::Validation(
            "Please provide your full name and mobile number".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::domain::{Account, Profile};
    use std::sync::atomic::{AtomicU64, Ordering};

    fn start() -> (AuthService, ProfileClient) {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("user_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (account_actor, accounts) = ResourceActor::<Account>::new(10, next_id);
        let (profile_actor, profiles) = ResourceActor::<Profile>::new(10, || "unused".to_string());
        tokio::spawn(account_actor.run());
        tokio::spawn(profile_actor.run());

        let profiles = ProfileClient::new(profiles);
        (AuthService::new(AccountClient::new(accounts), profiles.clone()), profiles)
    }

    fn form(email: &str) -> SignUp {
        SignUp {
            email: email.into(),
            password: "hunter22".into(),
            full_name: "Asha Rao".into(),
            mobile_number: "9876543210".into(),
            college: Some("IIT Madras".into()),
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password(&hash, "correct horse").unwrap());
        assert!(!verify_password(&hash, "wrong horse").unwrap());
        assert!(hash_password("").is_err());
    }

    #[tokio::test]
    async fn test_sign_up_creates_profile_with_account_id() {
        let (auth, profiles) = start();
        let session = auth.sign_up(form("Asha@Example.com")).await.unwrap();

        assert_eq!(session.email, "asha@example.com");
        let profile = profiles.get_profile(session.user_id.clone()).await.unwrap().unwrap();
        assert_eq!(profile.college.as_deref(), Some("IIT Madras"));
        assert_eq!(auth.current_session().await, Some(session));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_refused() {
        let (auth, _) = start();
        auth.sign_up(form("asha@example.com")).await.unwrap();
        let again = auth.sign_up(form("ASHA@example.com")).await;
        assert_eq!(again, Err(AuthError::EmailTaken("asha@example.com".into())));
    }

    #[tokio::test]
    async fn test_concurrent_sign_ups_with_one_email_create_one_account() {
        let (auth, profiles) = start();
        let (first, second) = tokio::join!(
            auth.sign_up(form("asha@example.com")),
            auth.sign_up(form("Asha@Example.com")),
        );

        let taken = Err(AuthError::EmailTaken("asha@example.com".into()));
        assert!(first.is_ok() != second.is_ok());
        assert!(first == taken || second == taken);
        assert_eq!(profiles.list_profiles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let (auth, _) = start();
        let created = auth.sign_up(form("asha@example.com")).await.unwrap();
        auth.sign_out(&created).await.unwrap();
        assert_eq!(auth.current_session().await, None);

        let wrong_password = auth.sign_in("asha@example.com", "nope").await;
        assert_eq!(wrong_password, Err(AuthError::InvalidCredentials));
        let unknown_email = auth.sign_in("who@example.com", "hunter22").await;
        assert_eq!(unknown_email, Err(AuthError::InvalidCredentials));

        let session = auth.sign_in(" asha@example.com ", "hunter22").await.unwrap();
        assert_eq!(session.user_id, created.user_id);
        assert_eq!(auth.sign_out(&session).await, Ok(()));
        assert_eq!(auth.sign_out(&session).await, Err(AuthError::NotSignedIn));
    }

    #[tokio::test]
    async fn test_missing_fields_block_sign_up() {
        let (auth, _) = start();
        let mut incomplete = form("asha@example.com");
        incomplete.mobile_number = "  ".into();
        assert!(matches!(auth.sign_up(incomplete).await, Err(AuthError::Validation(_))));

        let mut short = form("asha@example.com");
        short.password = "abc".into();
        assert!(matches!(auth.sign_up(short).await, Err(AuthError::Validation(_))));
    }
}
