use std::sync::Arc;

use tonic::Status;

use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::grpc::requests::RegisterReq;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: Arc<S>,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    let req = RegisterReq::try_from(request)?;

    let user_id = service
        .register_new_user(&req.email, &req.password)
        .await?;

    Ok(RegisterResponse {
        user_id: user_id.get(),
    })
}
