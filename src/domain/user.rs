use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ContactCard;

/// Public profile of a registered user. `id` is the auth identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub mobile_number: String,
    pub college: Option<String>,
    pub email: String,
}

impl Profile {
    pub fn contact_card(&self) -> ContactCard {
        ContactCard {
            full_name: self.full_name.clone(),
            mobile_number: self.mobile_number.clone(),
            college: self.college.clone(),
        }
    }
}

/// Payload for creating a profile at sign-up.
#[derive(Debug, Clone)]
pub struct ProfileCreate {
    pub id: String,
    pub full_name: String,
    pub mobile_number: String,
    pub college: Option<String>,
    pub email: String,
}

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
    pub college: Option<String>,
}

/// Sign-in credentials. Never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AccountCreate {
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// An elevated role grant. Plain users have no row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRole {
    pub user_id: String,
    pub role: Role,
}

/// A profile together with its admin flag, as listed in user management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(flatten)]
    pub profile: Profile,
    pub is_admin: bool,
}
