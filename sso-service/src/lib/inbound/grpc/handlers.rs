use tonic::Status;

use crate::domain::auth::errors::AuthError;

pub mod is_admin;
pub mod login;
pub mod register;

/// Map every core error kind to the status callers see.
///
/// Internal kinds collapse into one opaque status; their context has already
/// been logged by the core.
impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Status::invalid_argument("invalid email or password"),
            AuthError::InvalidAppId => Status::invalid_argument("invalid app id"),
            AuthError::UserAlreadyExists => Status::already_exists("user already exists"),
            AuthError::UserNotFound => Status::not_found("user not found"),
            AuthError::RegistrationFailed(_)
            | AuthError::TokenIssuance(_)
            | AuthError::Internal(_) => Status::internal("internal error"),
        }
    }
}
