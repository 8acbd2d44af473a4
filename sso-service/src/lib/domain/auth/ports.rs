use async_trait::async_trait;
use chrono::Duration;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::HashError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::errors::TokenError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a session token for an application.
    ///
    /// # Arguments
    /// * `email` - Email of the account
    /// * `password` - Plaintext password to verify
    /// * `app_id` - Application the token is scoped to
    ///
    /// # Returns
    /// Signed session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `InvalidAppId` - Application does not exist
    /// * `TokenIssuance` - Token could not be signed
    /// * `Internal` - Storage or hashing failure
    async fn login(
        &self,
        email: &EmailAddress,
        password: &Password,
        app_id: AppId,
    ) -> Result<String, AuthError>;

    /// Register a new account.
    ///
    /// # Arguments
    /// * `email` - Email of the new account
    /// * `password` - Plaintext password (hashed before it reaches storage)
    ///
    /// # Returns
    /// Identifier of the created user
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `RegistrationFailed` - Password could not be hashed
    /// * `Internal` - Storage failure
    async fn register_new_user(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<UserId, AuthError>;

    /// Report whether a user holds administrator privileges.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `Internal` - Storage failure
    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError>;
}

/// Persists new users.
#[async_trait]
pub trait UserSaver: Send + Sync + 'static {
    /// Store a user with an already-hashed password.
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    /// * `Database` - Storage operation failed
    async fn save_user(
        &self,
        email: &EmailAddress,
        password_hash: &PasswordHash,
    ) -> Result<UserId, StorageError>;
}

/// Reads user records.
#[async_trait]
pub trait UserProvider: Send + Sync + 'static {
    /// Look up a user by email.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Database` - Storage operation failed
    async fn user(&self, email: &EmailAddress) -> Result<User, StorageError>;

    /// Read the administrator flag of a user.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `Database` - Storage operation failed
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError>;
}

/// Reads tenant applications.
#[async_trait]
pub trait AppProvider: Send + Sync + 'static {
    /// Look up an application by identifier.
    ///
    /// # Errors
    /// * `AppNotFound` - Application does not exist
    /// * `Database` - Storage operation failed
    async fn app(&self, app_id: AppId) -> Result<App, StorageError>;
}

/// One-way password hashing.
///
/// Implementations must keep the CPU-bound work off the async executor.
#[async_trait]
pub trait CredentialHasher: Send + Sync + 'static {
    /// Produce a salted, self-describing digest.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing primitive failed
    /// * `WorkerUnavailable` - Hashing worker could not run the job
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError>;

    /// Check a password against a stored digest.
    ///
    /// # Returns
    /// `false` on mismatch
    ///
    /// # Errors
    /// * `MalformedDigest` - Digest cannot be parsed
    /// * `WorkerUnavailable` - Hashing worker could not run the job
    async fn verify(&self, digest: &PasswordHash, password: &Password) -> Result<bool, HashError>;

    /// Spend the same effort as `verify` without a real digest.
    ///
    /// Used when the account does not exist so that the response time does not
    /// reveal whether an email is registered.
    async fn verify_decoy(&self, password: &Password);
}

/// Signs session tokens.
pub trait TokenIssuer: Send + Sync + 'static {
    /// Issue a token for `user` scoped to `app`, expiring after `ttl`.
    ///
    /// # Errors
    /// * `MissingSigningKey` - Application has no secret
    /// * `SigningFailed` - Encoding or signing failed
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError>;
}
