use tracing::{info, instrument};

use super::inline_create::with_ensured;
use super::Marketplace;
use crate::auth::{Session, SignUp};
use crate::domain::{Profile, ProfileUpdate};
use crate::error::{AppError, AppResult};

/// A college picked from the list or typed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollegeChoice {
    Existing(String),
    /// Added to the college list unless a college with this name exists.
    New(String),
}

impl CollegeChoice {
    fn name(&self) -> &str {
        match self {
            CollegeChoice::Existing(name) | CollegeChoice::New(name) => name.trim(),
        }
    }
}

/// The sign-up form.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub mobile_number: String,
    pub college: CollegeChoice,
}

/// Profile fields to change. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileEdit {
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
    pub college: Option<CollegeChoice>,
}

impl Marketplace {
    /// Registers and signs in. A newly typed college is added first and
    /// removed again if the account cannot be created.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn sign_up(&self, form: SignUpForm) -> AppResult<Session> {
        let college = form.college.name().to_string();
        if college.is_empty() {
            let message = "Please select or enter your college".to_string();
            return Err(AppError::Validation(message));
        }
        let sign_up = SignUp {
            email: form.email,
            password: form.password,
            full_name: form.full_name,
            mobile_number: form.mobile_number,
            college: Some(college.clone()),
        };

        match form.college {
            CollegeChoice::Existing(_) => Ok(self.auth.sign_up(sign_up).await?),
            CollegeChoice::New(_) => {
                with_ensured(
                    &self.colleges,
                    &college,
                    |_| async move { self.auth.sign_up(sign_up).await.map_err(AppError::from) },
                    |college| self.college_in_use(college.name),
                )
                .await
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        Ok(self.auth.sign_in(email, password).await?)
    }

    pub async fn sign_out(&self, session: &Session) -> AppResult<()> {
        Ok(self.auth.sign_out(session).await?)
    }

    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn my_profile(&self, session: &Session) -> AppResult<Profile> {
        self.profiles
            .get_profile(session.user_id.clone())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {}", session.user_id)))
    }

    /// Updates the signed-in user's own profile. A newly typed college is
    /// added first and removed again if the profile update fails.
    #[instrument(skip(self, session, edit), fields(user_id = %session.user_id))]
    pub async fn update_profile(&self, session: &Session, edit: ProfileEdit) -> AppResult<Profile> {
        let ProfileEdit { full_name, mobile_number, college } = edit;
        if college.as_ref().is_some_and(|c| c.name().is_empty()) {
            return Err(AppError::Validation("College cannot be empty".to_string()));
        }
        let update = ProfileUpdate { full_name, mobile_number, college: None };

        let profile = match college {
            None => self.profiles.update_profile(session.user_id.clone(), update).await?,
            Some(CollegeChoice::Existing(name)) => {
                let update = ProfileUpdate { college: Some(name.trim().to_string()), ..update };
                self.profiles.update_profile(session.user_id.clone(), update).await?
            }
            Some(CollegeChoice::New(name)) => {
                with_ensured(
                    &self.colleges,
                    &name,
                    |college| async move {
                        let update = ProfileUpdate { college: Some(college.name), ..update };
                        let user_id = session.user_id.clone();
                        self.profiles.update_profile(user_id, update).await.map_err(AppError::from)
                    },
                    |college| self.college_in_use(college.name),
                )
                .await?
            }
        };

        info!("Profile updated");
        Ok(profile)
    }
}
