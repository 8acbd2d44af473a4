use auth::JwtError;
use auth::JwtHandler;
use auth::SessionClaims;
use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::errors::TokenError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::User;
use crate::domain::auth::ports::TokenIssuer;

/// Issues HS256 session tokens signed with the application's own secret.
#[derive(Debug, Default, Clone, Copy)]
pub struct JwtTokenIssuer;

impl JwtTokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl From<JwtError> for TokenError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::MissingSigningKey => TokenError::MissingSigningKey,
            e => TokenError::SigningFailed(e.to_string()),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
        let handler = JwtHandler::new(app.secret.as_bytes())?;

        let claims = SessionClaims::new(
            user.id.get(),
            user.email.as_str(),
            app.id.get(),
            Utc::now(),
            ttl,
        )?;

        Ok(handler.encode(&claims)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::models::AppId;
    use crate::domain::auth::models::EmailAddress;
    use crate::domain::auth::models::PasswordHash;
    use crate::domain::auth::models::UserId;

    fn user() -> User {
        User {
            id: UserId::new(5).unwrap(),
            email: EmailAddress::new("grace@example.com".to_string()).unwrap(),
            password_hash: PasswordHash::new("$argon2id$digest".to_string()),
        }
    }

    fn app(secret: &str) -> App {
        App {
            id: AppId::new(3).unwrap(),
            name: "mobile".to_string(),
            secret: secret.to_string(),
        }
    }

    #[test]
    fn test_issue_binds_user_and_app() {
        let before = Utc::now().timestamp();
        let token = JwtTokenIssuer::new()
            .issue(&user(), &app("mobile-secret"), Duration::minutes(30))
            .expect("Failed to issue token");
        let after = Utc::now().timestamp();

        let claims: SessionClaims = JwtHandler::new(b"mobile-secret")
            .unwrap()
            .decode(&token)
            .expect("Failed to decode token");

        assert_eq!(claims.uid, 5);
        assert_eq!(claims.email, "grace@example.com");
        assert_eq!(claims.app_id, 3);
        assert!(claims.exp >= before + 30 * 60);
        assert!(claims.exp <= after + 30 * 60);
    }

    #[test]
    fn test_token_is_scoped_to_tenant_secret() {
        let token = JwtTokenIssuer::new()
            .issue(&user(), &app("mobile-secret"), Duration::minutes(30))
            .unwrap();

        let result = JwtHandler::new(b"another-tenant-secret")
            .unwrap()
            .decode::<SessionClaims>(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_secret() {
        let result = JwtTokenIssuer::new().issue(&user(), &app(""), Duration::minutes(30));
        assert!(matches!(result, Err(TokenError::MissingSigningKey)));
    }

    #[test]
    fn test_unrepresentable_expiry_is_signing_failure() {
        let result = JwtTokenIssuer::new().issue(
            &user(),
            &app("mobile-secret"),
            Duration::seconds(9_000_000_000_000),
        );

        assert!(matches!(result, Err(TokenError::SigningFailed(_))));
    }
}
