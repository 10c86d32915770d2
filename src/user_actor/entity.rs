use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Account, AccountCreate, Profile, ProfileCreate, ProfileUpdate, Role, UserRole};

fn required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

impl Entity for Profile {
    type Id = String;
    type CreateParams = ProfileCreate;
    type Update = ProfileUpdate;
    type Action = ();
    type ActionResult = ();

    const TABLE: &'static str = "profiles";

    fn preset_id(params: &ProfileCreate) -> Option<String> {
        Some(params.id.clone())
    }

    fn from_create_params(id: String, params: ProfileCreate) -> Result<Self, String> {
        required("Full name", &params.full_name)?;
        required("Mobile number", &params.mobile_number)?;
        Ok(Self {
            id,
            full_name: params.full_name,
            mobile_number: params.mobile_number,
            college: params.college,
            email: params.email,
        })
    }

    fn on_update(&mut self, update: ProfileUpdate) -> Result<(), String> {
        if let Some(full_name) = update.full_name {
            required("Full name", &full_name)?;
            self.full_name = full_name;
        }
        if let Some(mobile_number) = update.mobile_number {
            required("Mobile number", &mobile_number)?;
            self.mobile_number = mobile_number;
        }
        if let Some(college) = update.college {
            self.college = Some(college);
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

impl Entity for Account {
    type Id = String;
    type CreateParams = AccountCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();

    const TABLE: &'static str = "accounts";

    fn from_create_params(id: String, params: AccountCreate) -> Result<Self, String> {
        required("Email", &params.email)?;
        Ok(Self {
            id,
            email: params.email,
            password_hash: params.password_hash,
            created_at: Utc::now(),
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.to_lowercase())
    }

    fn on_update(&mut self, _update: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

impl Entity for UserRole {
    type Id = String;
    type CreateParams = UserRole;
    type Update = Role;
    type Action = ();
    type ActionResult = ();

    const TABLE: &'static str = "user_roles";

    /// One role row per user, keyed by the user id.
    fn preset_id(params: &UserRole) -> Option<String> {
        Some(params.user_id.clone())
    }

    fn from_create_params(id: String, params: UserRole) -> Result<Self, String> {
        Ok(Self { user_id: id, role: params.role })
    }

    fn on_update(&mut self, role: Role) -> Result<(), String> {
        self.role = role;
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
