use std::sync::Arc;

use auth::HashingCost;
use auth::JwtHandler;
use chrono::Duration;
use sso_service::domain::auth::models::AppId;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::outbound::BlockingHasher;
use sso_service::outbound::JwtTokenIssuer;
use sso_service::outbound::SqliteStorage;
use sso_service::proto::auth_client::AuthClient;
use sso_service::proto::auth_server::AuthServer;
use sso_service::proto::LoginRequest;
use sso_service::proto::RegisterRequest;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Server;

pub const APP_SECRET: &str = "test-app-secret-used-for-signing-tokens";
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Test application that serves the gRPC API on an ephemeral port
pub struct TestApp {
    pub client: AuthClient<Channel>,
    pub storage: Arc<SqliteStorage>,
    pub app_id: AppId,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the server in a background task over a fresh in-memory database
    pub async fn spawn() -> Self {
        let storage = Arc::new(
            SqliteStorage::connect("sqlite::memory:", 1)
                .await
                .expect("Failed to open in-memory database"),
        );
        storage.migrate().await.expect("Failed to run migrations");

        let app_id = storage
            .save_app("test-app", APP_SECRET)
            .await
            .expect("Failed to register test app");

        // Lowest cost Argon2 accepts; tests only care about behaviour.
        let hasher = Arc::new(
            BlockingHasher::new(
                HashingCost {
                    memory_kib: 64,
                    iterations: 1,
                    parallelism: 1,
                },
                4,
            )
            .expect("Failed to build hasher"),
        );

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&storage),
            Arc::clone(&storage),
            Arc::clone(&storage),
            hasher,
            Arc::new(JwtTokenIssuer::new()),
            Duration::seconds(TOKEN_TTL_SECS),
        ));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        let grpc_service = AuthGrpcService::new(auth_service);
        tokio::spawn(async move {
            Server::builder()
                .add_service(AuthServer::new(grpc_service))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("Server error");
        });

        let client = AuthClient::connect(format!("http://127.0.0.1:{}", port))
            .await
            .expect("Failed to connect gRPC client");

        Self {
            client,
            storage,
            app_id,
            jwt_handler: JwtHandler::new(APP_SECRET.as_bytes())
                .expect("Failed to build JWT handler"),
        }
    }

    /// Register a user and return its identifier
    pub async fn register(&self, email: &str, password: &str) -> i64 {
        self.client
            .clone()
            .register(RegisterRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .expect("Failed to register user")
            .into_inner()
            .user_id
    }

    /// Log in against the test app
    pub async fn login(&self, email: &str, password: &str) -> Result<String, tonic::Status> {
        self.client
            .clone()
            .login(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
                app_id: self.app_id.get(),
            })
            .await
            .map(|response| response.into_inner().token)
    }
}
