use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email is required")]
    Empty,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password is required")]
    Empty,
}

/// Error for UserId and AppId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Identifier must be a positive integer, got {0}")]
    NotPositive(i64),
}

/// Error raised by record providers.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("User already exists")]
    UserExists,

    #[error("User not found")]
    UserNotFound,

    #[error("App not found")]
    AppNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Stored record is invalid: {0}")]
    CorruptRecord(String),
}

/// Error raised by the credential hasher.
#[derive(Debug, Clone, Error)]
pub enum HashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Malformed password digest: {0}")]
    MalformedDigest(String),

    #[error("Hashing worker unavailable: {0}")]
    WorkerUnavailable(String),
}

/// Error raised by the token issuer.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Application has no signing secret")]
    MissingSigningKey,

    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}

/// Top-level error for authentication operations.
///
/// Every collaborator failure is classified into exactly one variant before it
/// leaves the core. The `String` payloads carry context for server-side logs and
/// are never forwarded to callers.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid app id")]
    InvalidAppId,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
