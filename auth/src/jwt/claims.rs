use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claims carried by a session token.
///
/// Exactly four fields are serialized: the user, the user's email, the
/// application the token was issued for, and the expiry. Nothing else is
/// embedded, in particular no password material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// User identifier
    pub uid: i64,

    /// User email address
    pub email: String,

    /// Application (tenant) identifier
    pub app_id: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a login performed at `issued_at`.
    ///
    /// # Arguments
    /// * `uid` - User identifier
    /// * `email` - User email address
    /// * `app_id` - Application the token is scoped to
    /// * `issued_at` - Issue instant
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Claims with `exp = issued_at + ttl`
    ///
    /// # Errors
    /// * `ExpiryOutOfRange` - `issued_at + ttl` is not a representable instant
    pub fn new(
        uid: i64,
        email: impl Into<String>,
        app_id: i64,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(JwtError::ExpiryOutOfRange)?;

        Ok(Self {
            uid,
            email: email.into(),
            app_id,
            exp: expires_at.timestamp(),
        })
    }
}
