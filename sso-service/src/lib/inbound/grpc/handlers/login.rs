use tonic::Status;

use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S>(service: &S, request: LoginRequest) -> Result<LoginResponse, Status>
where
    S: AuthServicePort,
{
    let token = service
        .login(&request.email, &request.password, request.app_id)
        .await?;

    Ok(LoginResponse { token })
}
