//! Authentication endpoints.
//!
//! Login and register both return `{user, token}`; the client stores the
//! token so subsequent requests carry it as a bearer header.

use nexus_shop_core::User;
use secrecy::SecretString;
use serde_json::json;
use tracing::instrument;

use super::{ApiClient, ApiError};

/// Result of a successful login or registration.
#[derive(Clone)]
pub struct AuthSession {
    /// Session projection of the authenticated user.
    pub user: User,
    /// Bearer token; already attached to the client.
    pub token: SecretString,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl ApiClient {
    /// Log in with email and password.
    ///
    /// On success the returned token is stored on the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the response
    /// does not carry a `{user, token}` pair.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = self
            .post_json("/auth/login", &json!({"email": email, "password": password}))
            .await?;
        self.session_from(body)
    }

    /// Register a new account.
    ///
    /// On success the returned token is stored on the client.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is rejected or the response does
    /// not carry a `{user, token}` pair.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthSession, ApiError> {
        let body = self
            .post_json(
                "/auth/register",
                &json!({"email": email, "password": password, "name": name}),
            )
            .await?;
        self.session_from(body)
    }

    /// Fetch the user behind the current bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing/expired or the response
    /// cannot be decoded.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User, ApiError> {
        let body = self.get_json("/auth/me", &[]).await?;
        let raw = body.get("user").unwrap_or(&body);
        Ok(serde_json::from_value(raw.clone())?)
    }

    fn session_from(&self, body: serde_json::Value) -> Result<AuthSession, ApiError> {
        let user: User = body
            .get("user")
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .ok_or_else(|| ApiError::NotFound("user in auth response".to_string()))?;
        let token = body
            .get("token")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| ApiError::NotFound("token in auth response".to_string()))?;

        let token = SecretString::from(token.to_string());
        self.set_auth_token(token.clone());

        Ok(AuthSession { user, token })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use nexus_shop_core::{UserId, UserRole};

    fn client() -> ApiClient {
        ApiClient::new(&ClientConfig::default())
    }

    #[test]
    fn test_session_from_valid_body() {
        let client = client();
        let body = json!({
            "user": {"id": 1, "email": "a@b.com", "name": "Ana", "role": "admin"},
            "token": "jwt-abc"
        });

        let session = client.session_from(body).unwrap();
        assert_eq!(session.user.id, UserId::new(1));
        assert_eq!(session.user.role, UserRole::Admin);
        assert!(client.has_auth_token());
    }

    #[test]
    fn test_session_from_missing_token() {
        let client = client();
        let body = json!({
            "user": {"id": 1, "email": "a@b.com", "name": "Ana", "role": "user"}
        });
        assert!(client.session_from(body).is_err());
        assert!(!client.has_auth_token());
    }

    #[test]
    fn test_auth_session_debug_redacts_token() {
        let session = AuthSession {
            user: User {
                id: UserId::new(1),
                email: "a@b.com".to_string(),
                name: "Ana".to_string(),
                role: UserRole::User,
            },
            token: SecretString::from("jwt-secret-value"),
        };
        let debug_output = format!("{session:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("jwt-secret-value"));
    }
}
