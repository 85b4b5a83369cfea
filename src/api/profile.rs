//! Profile Endpoints

use list_state::ListError;
use serde::Serialize;

use super::ApiClient;
use crate::models::Profile;

/// Editable profile fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
}

impl ProfileUpdate {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            bio: profile.bio.clone(),
        }
    }

    /// Checked before anything is sent
    pub fn validate(&self) -> Result<(), ListError> {
        if self.name.trim().is_empty() {
            return Err(ListError::validation("name", "Name is required"));
        }
        let email = self.email.trim();
        let well_formed = email
            .split_once('@')
            .map(|(user, host)| !user.is_empty() && host.contains('.') && !host.starts_with('.') && !host.ends_with('.'))
            .unwrap_or(false);
        if !well_formed {
            return Err(ListError::validation("email", "Enter a valid email address"));
        }
        Ok(())
    }
}

pub async fn get_profile(api: &ApiClient) -> Result<Profile, ListError> {
    api.get("/profile").await
}

pub async fn update_profile(api: &ApiClient, update: &ProfileUpdate) -> Result<Profile, ListError> {
    update.validate()?;
    api.put("/profile", update).await
}
