use std::sync::Arc;

use tonic::Status;

use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::grpc::requests::LoginReq;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: Arc<S>,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    let req = LoginReq::try_from(request)?;

    let token = service
        .login(&req.email, &req.password, req.app_id)
        .await?;

    Ok(LoginResponse { token })
}
