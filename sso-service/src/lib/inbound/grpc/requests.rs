use thiserror::Error;
use tonic::Status;

use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::IdError;
use crate::domain::auth::errors::PasswordError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::UserId;
use crate::proto::IsAdminRequest;
use crate::proto::LoginRequest;
use crate::proto::RegisterRequest;

/// Validated `Login` input.
#[derive(Debug)]
pub struct LoginReq {
    pub email: EmailAddress,
    pub password: Password,
    pub app_id: AppId,
}

/// Validated `Register` input.
#[derive(Debug)]
pub struct RegisterReq {
    pub email: EmailAddress,
    pub password: Password,
}

/// Validated `IsAdmin` input.
#[derive(Debug)]
pub struct AdminCheckReq {
    pub user_id: UserId,
}

/// Field-level rejection of a request.
///
/// The message names the field only; the wrapped value error is kept for
/// server-side logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestValidationError {
    #[error("invalid email")]
    Email(#[from] EmailError),

    #[error("invalid password")]
    Password(#[from] PasswordError),

    #[error("invalid app id")]
    AppId(IdError),

    #[error("invalid user id")]
    UserId(IdError),
}

impl From<RequestValidationError> for Status {
    fn from(err: RequestValidationError) -> Self {
        tracing::debug!(error = ?err, "Rejected request");
        Status::invalid_argument(err.to_string())
    }
}

impl TryFrom<LoginRequest> for LoginReq {
    type Error = RequestValidationError;

    fn try_from(request: LoginRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            email: EmailAddress::new(request.email)?,
            password: Password::new(request.password)?,
            app_id: AppId::new(request.app_id).map_err(RequestValidationError::AppId)?,
        })
    }
}

impl TryFrom<RegisterRequest> for RegisterReq {
    type Error = RequestValidationError;

    fn try_from(request: RegisterRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            email: EmailAddress::new(request.email)?,
            password: Password::new(request.password)?,
        })
    }
}

impl TryFrom<IsAdminRequest> for AdminCheckReq {
    type Error = RequestValidationError;

    fn try_from(request: IsAdminRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(request.user_id).map_err(RequestValidationError::UserId)?,
        })
    }
}
