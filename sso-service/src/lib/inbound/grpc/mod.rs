use std::sync::Arc;
use std::time::Duration;

use tonic::transport::server::Router;
use tonic::transport::Server;

use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_server::AuthServer;

pub mod grpc_auth_server;
pub mod handlers;

pub use grpc_auth_server::AuthGrpcService;

/// Build the gRPC server exposing `sso.Auth`.
///
/// `request_timeout` bounds every call; expiry is reported as
/// `DEADLINE_EXCEEDED` by tonic.
pub fn create_grpc_router<S>(auth_service: Arc<S>, request_timeout: Duration) -> Router
where
    S: AuthServicePort,
{
    Server::builder()
        .timeout(request_timeout)
        .add_service(AuthServer::new(AuthGrpcService::new(auth_service)))
}
