//! User profile endpoints.

use nexus_shop_core::UserId;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::{ApiClient, ApiError};

/// Partial profile update. Unset fields are left out of the payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Password change payload for the dedicated password endpoint.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordChange").finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Update a user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, update), fields(id = %id))]
    pub async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<Value, ApiError> {
        self.put_json(&format!("/users/{id}"), &serde_json::to_value(update)?)
            .await
    }

    /// Change a user's password.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it
    /// (wrong current password, mismatched confirmation).
    #[instrument(skip(self, change), fields(id = %id))]
    pub async fn change_password(
        &self,
        id: UserId,
        change: &PasswordChange,
    ) -> Result<Value, ApiError> {
        self.put_json(&format!("/users/{id}/password"), &serde_json::to_value(change)?)
            .await
    }
}
