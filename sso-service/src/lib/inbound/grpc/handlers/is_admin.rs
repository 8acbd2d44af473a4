use std::sync::Arc;

use tonic::Status;

use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::grpc::requests::AdminCheckReq;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;

pub async fn is_admin<S: AuthServicePort>(
    service: Arc<S>,
    request: IsAdminRequest,
) -> Result<IsAdminResponse, Status> {
    let req = AdminCheckReq::try_from(request)?;

    let is_admin = service.is_admin(req.user_id).await?;

    Ok(IsAdminResponse { is_admin })
}
