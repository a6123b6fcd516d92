use tonic::Status;

use crate::domain::auth::ports::AuthServicePort;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;

pub async fn is_admin<S>(service: &S, request: IsAdminRequest) -> Result<IsAdminResponse, Status>
where
    S: AuthServicePort,
{
    let is_admin = service.is_admin(request.user_id).await?;

    Ok(IsAdminResponse { is_admin })
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::*;
    use crate::domain::auth::errors::AuthError;
    use crate::domain::auth::errors::UserIdError;
    use crate::domain::auth::errors::ValidationError;
    use crate::inbound::grpc::handlers::tests::MockTestAuthService;

    #[tokio::test]
    async fn test_is_admin() {
        let mut service = MockTestAuthService::new();
        service
            .expect_is_admin()
            .withf(|user_id| *user_id == 1)
            .returning(|_| Ok(true));
        service
            .expect_is_admin()
            .withf(|user_id| *user_id == 2)
            .returning(|_| Err(AuthError::UserNotFound));
        service
            .expect_is_admin()
            .withf(|user_id| *user_id == 0)
            .returning(|_| {
                Err(AuthError::InvalidInput(ValidationError::UserId(
                    UserIdError::Missing,
                )))
            });

        let response = is_admin(&service, IsAdminRequest { user_id: 1 })
            .await
            .unwrap();
        assert!(response.is_admin);

        let missing = is_admin(&service, IsAdminRequest { user_id: 2 })
            .await
            .unwrap_err();
        assert_eq!(missing.code(), Code::NotFound);

        let zero = is_admin(&service, IsAdminRequest { user_id: 0 })
            .await
            .unwrap_err();
        assert_eq!(zero.code(), Code::InvalidArgument);
    }
}
