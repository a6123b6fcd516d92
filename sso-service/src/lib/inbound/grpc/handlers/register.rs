use tonic::Status;

use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S>(service: &S, request: RegisterRequest) -> Result<RegisterResponse, Status>
where
    S: AuthServicePort,
{
    let user_id = service
        .register(&request.email, &request.password)
        .await?;

    Ok(RegisterResponse { user_id: user_id.0 })
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::*;
    use crate::domain::auth::errors::AuthError;
    use crate::domain::auth::models::UserId;
    use crate::inbound::grpc::handlers::tests::MockTestAuthService;

    #[tokio::test]
    async fn test_register_returns_user_id() {
        let mut service = MockTestAuthService::new();
        service
            .expect_register()
            .withf(|email, password| email == "user@example.com" && password == "Sup3rSecret!")
            .times(1)
            .returning(|_, _| Ok(UserId(9)));

        let response = register(
            &service,
            RegisterRequest {
                email: "user@example.com".to_string(),
                password: "Sup3rSecret!".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.user_id, 9);
    }

    #[tokio::test]
    async fn test_register_duplicate_is_already_exists() {
        let mut service = MockTestAuthService::new();
        service
            .expect_register()
            .returning(|_, _| Err(AuthError::UserExists));

        let status = register(
            &service,
            RegisterRequest {
                email: "user@example.com".to_string(),
                password: "Sup3rSecret!".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(status.code(), Code::AlreadyExists);
        assert_eq!(status.message(), "user already exists");
    }
}
