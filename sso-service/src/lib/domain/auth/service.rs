use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppProvider;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialHasher;
use crate::domain::auth::ports::TokenIssuer;
use crate::domain::auth::ports::UserProvider;
use crate::domain::auth::ports::UserSaver;

/// Domain service implementation for authentication operations.
///
/// Holds no per-request state; every collaborator is injected at startup and
/// shared behind an `Arc`.
pub struct AuthService<US, UP, AP, CH, TI>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
    CH: CredentialHasher,
    TI: TokenIssuer,
{
    user_saver: Arc<US>,
    user_provider: Arc<UP>,
    app_provider: Arc<AP>,
    hasher: Arc<CH>,
    token_issuer: Arc<TI>,
    token_ttl: Duration,
}

impl<US, UP, AP, CH, TI> AuthService<US, UP, AP, CH, TI>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
    CH: CredentialHasher,
    TI: TokenIssuer,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_saver` - User persistence implementation
    /// * `user_provider` - User lookup implementation
    /// * `app_provider` - Application lookup implementation
    /// * `hasher` - Password hashing implementation
    /// * `token_issuer` - Session token signing implementation
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(
        user_saver: Arc<US>,
        user_provider: Arc<UP>,
        app_provider: Arc<AP>,
        hasher: Arc<CH>,
        token_issuer: Arc<TI>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            hasher,
            token_issuer,
            token_ttl,
        }
    }
}

// Unknown email and wrong password must leave the same trace.
fn invalid_credentials(email: &EmailAddress) -> AuthError {
    tracing::warn!(op = "auth.login", email = %email, "Invalid credentials");
    AuthError::InvalidCredentials
}

#[async_trait]
impl<US, UP, AP, CH, TI> AuthServicePort for AuthService<US, UP, AP, CH, TI>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
    CH: CredentialHasher,
    TI: TokenIssuer,
{
    async fn login(
        &self,
        email: &EmailAddress,
        password: &Password,
        app_id: AppId,
    ) -> Result<String, AuthError> {
        tracing::info!(op = "auth.login", email = %email, app_id = %app_id, "Attempting to login user");

        let user = match self.user_provider.user(email).await {
            Ok(user) => user,
            Err(StorageError::UserNotFound) => {
                self.hasher.verify_decoy(password).await;
                return Err(invalid_credentials(email));
            }
            Err(e) => {
                tracing::error!(op = "auth.login", error = %e, "Failed to get user");
                return Err(AuthError::Internal(e.to_string()));
            }
        };

        let password_matches = self
            .hasher
            .verify(&user.password_hash, password)
            .await
            .map_err(|e| {
                tracing::error!(op = "auth.login", user_id = %user.id, error = %e, "Failed to verify password");
                AuthError::Internal(e.to_string())
            })?;

        if !password_matches {
            return Err(invalid_credentials(email));
        }

        let app = self.app_provider.app(app_id).await.map_err(|e| match e {
            StorageError::AppNotFound => {
                tracing::warn!(op = "auth.login", app_id = %app_id, "App not found");
                AuthError::InvalidAppId
            }
            e => {
                tracing::error!(op = "auth.login", app_id = %app_id, error = %e, "Failed to get app");
                AuthError::Internal(e.to_string())
            }
        })?;

        let token = self
            .token_issuer
            .issue(&user, &app, self.token_ttl)
            .map_err(|e| {
                tracing::error!(op = "auth.login", app_id = %app_id, error = %e, "Failed to create token");
                AuthError::TokenIssuance(e.to_string())
            })?;

        tracing::info!(op = "auth.login", user_id = %user.id, app_id = %app_id, "User logged in");

        Ok(token)
    }

    async fn register_new_user(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<UserId, AuthError> {
        tracing::info!(op = "auth.register_new_user", email = %email, "Registering new user");

        let password_hash = self.hasher.hash(password).await.map_err(|e| {
            tracing::error!(op = "auth.register_new_user", error = %e, "Failed to hash password");
            AuthError::RegistrationFailed(e.to_string())
        })?;

        let user_id = self
            .user_saver
            .save_user(email, &password_hash)
            .await
            .map_err(|e| match e {
                StorageError::UserExists => {
                    tracing::warn!(op = "auth.register_new_user", email = %email, "User already exists");
                    AuthError::UserAlreadyExists
                }
                e => {
                    tracing::error!(op = "auth.register_new_user", error = %e, "Failed to save user");
                    AuthError::Internal(e.to_string())
                }
            })?;

        tracing::info!(op = "auth.register_new_user", user_id = %user_id, "User registered");

        Ok(user_id)
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError> {
        tracing::info!(op = "auth.is_admin", user_id = %user_id, "Checking if user is admin");

        let is_admin = self
            .user_provider
            .is_admin(user_id)
            .await
            .map_err(|e| match e {
                StorageError::UserNotFound => {
                    tracing::warn!(op = "auth.is_admin", user_id = %user_id, "User not found");
                    AuthError::UserNotFound
                }
                e => {
                    tracing::error!(op = "auth.is_admin", user_id = %user_id, error = %e, "Failed to check admin flag");
                    AuthError::Internal(e.to_string())
                }
            })?;

        tracing::info!(op = "auth.is_admin", user_id = %user_id, is_admin, "Checked if user is admin");

        Ok(is_admin)
    }
}
