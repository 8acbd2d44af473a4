mod common;

use auth::JwtHandler;
use auth::SessionClaims;
use chrono::Utc;
use common::TestApp;
use common::TOKEN_TTL_SECS;
use sso_service::domain::auth::models::UserId;
use sso_service::proto::IsAdminRequest;
use sso_service::proto::LoginRequest;
use sso_service::proto::RegisterRequest;
use tonic::Code;

#[tokio::test]
async fn test_register_then_login_issues_scoped_token() {
    let app = TestApp::spawn().await;

    let user_id = app.register("nicola@example.com", "pass_word!").await;
    assert!(user_id > 0);

    let before = Utc::now().timestamp();
    let token = app
        .login("nicola@example.com", "pass_word!")
        .await
        .expect("Login failed");
    let after = Utc::now().timestamp();

    let claims: SessionClaims = app.jwt_handler.decode(&token).expect("Invalid token");
    assert_eq!(claims.uid, user_id);
    assert_eq!(claims.email, "nicola@example.com");
    assert_eq!(claims.app_id, app.app_id.get());
    assert!(claims.exp >= before + TOKEN_TTL_SECS);
    assert!(claims.exp <= after + TOKEN_TTL_SECS);
}

#[tokio::test]
async fn test_token_does_not_verify_with_another_app_secret() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;
    app.storage
        .save_app("other-app", "another-tenant-secret")
        .await
        .unwrap();

    let token = app.login("nicola@example.com", "pass_word!").await.unwrap();

    let other = JwtHandler::new(b"another-tenant-secret").unwrap();
    assert!(other.decode::<SessionClaims>(&token).is_err());
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;

    let wrong_password = app
        .login("nicola@example.com", "not_the_password")
        .await
        .unwrap_err();
    let unknown_email = app
        .login("nobody@example.com", "pass_word!")
        .await
        .unwrap_err();

    assert_eq!(wrong_password.code(), Code::InvalidArgument);
    assert_eq!(wrong_password.code(), unknown_email.code());
    assert_eq!(wrong_password.message(), unknown_email.message());
}

#[tokio::test]
async fn test_login_unknown_app() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;

    let status = app
        .client
        .clone()
        .login(LoginRequest {
            email: "nicola@example.com".to_string(),
            password: "pass_word!".to_string(),
            app_id: app.app_id.get() + 100,
        })
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "invalid app id");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;

    let status = app
        .client
        .clone()
        .register(RegisterRequest {
            email: "nicola@example.com".to_string(),
            password: "something_else".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::AlreadyExists);

    // The first password still works.
    assert!(app.login("nicola@example.com", "pass_word!").await.is_ok());
}

#[tokio::test]
async fn test_concurrent_registration_admits_one() {
    let app = TestApp::spawn().await;

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let mut client = app.client.clone();
            tokio::spawn(async move {
                client
                    .register(RegisterRequest {
                        email: "race@example.com".to_string(),
                        password: "pass_word!".to_string(),
                    })
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(_) => created += 1,
            Err(status) => assert_eq!(status.code(), Code::AlreadyExists),
        }
    }

    assert_eq!(created, 1);
}

#[tokio::test]
async fn test_is_admin() {
    let app = TestApp::spawn().await;
    let user_id = app.register("nicola@example.com", "pass_word!").await;

    let response = app
        .client
        .clone()
        .is_admin(IsAdminRequest { user_id })
        .await
        .unwrap()
        .into_inner();
    assert!(!response.is_admin);

    app.storage
        .set_admin(UserId::new(user_id).unwrap(), true)
        .await
        .unwrap();

    let response = app
        .client
        .clone()
        .is_admin(IsAdminRequest { user_id })
        .await
        .unwrap()
        .into_inner();
    assert!(response.is_admin);
}

#[tokio::test]
async fn test_is_admin_unknown_user() {
    let app = TestApp::spawn().await;

    let status = app
        .client
        .clone()
        .is_admin(IsAdminRequest { user_id: 404 })
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn test_invalid_input_is_rejected() {
    let app = TestApp::spawn().await;
    let mut client = app.client.clone();

    let status = client
        .register(RegisterRequest {
            email: String::new(),
            password: "pass_word!".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let status = client
        .register(RegisterRequest {
            email: "nicola@example.com".to_string(),
            password: String::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let status = client
        .login(LoginRequest {
            email: "nicola@example.com".to_string(),
            password: "pass_word!".to_string(),
            app_id: 0,
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let status = client
        .is_admin(IsAdminRequest { user_id: -1 })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
}
