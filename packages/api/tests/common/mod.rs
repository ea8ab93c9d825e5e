use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use draft_api::state::AppState;
use draft_shared::repositories::in_memory::{
    InMemoryGameRepository, InMemoryInviteRepository, InMemoryUserRepository,
};
use draft_shared::services::auth_service::AuthService;
use draft_shared::services::draft_engine::DraftRules;
use draft_shared::services::game_service::GameService;
use draft_shared::services::invite_service::InviteService;
use draft_shared::services::user_service::UserService;

pub const PASSWORD: &str = "correct-horse-battery";

pub fn test_app() -> Router {
    let user_repository = Arc::new(InMemoryUserRepository::new());
    let user_service = Arc::new(UserService::new(user_repository.clone()));
    let auth_service = Arc::new(AuthService::with_jwt_secret(
        user_service,
        "integration-test-secret",
    ));
    let game_service = Arc::new(GameService::new(
        Arc::new(InMemoryGameRepository::new()),
        DraftRules::default(),
    ));
    let invite_service = Arc::new(InviteService::new(
        Arc::new(InMemoryInviteRepository::new()),
        user_repository,
        game_service.clone(),
    ));

    draft_api::app(AppState {
        auth_service,
        game_service,
        invite_service,
    })
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed to respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Signs a user up and logs them in, returning `(user_id, token)`.
pub async fn register(app: &Router, username: &str) -> (String, String) {
    let credentials = serde_json::json!({ "username": username, "password": PASSWORD });

    let (status, profile) = send(
        app,
        Method::POST,
        "/auth/signup",
        None,
        Some(credentials.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", profile);

    let (status, login) = send(app, Method::POST, "/auth/login", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", login);

    (
        profile["id"].as_str().expect("profile id").to_string(),
        login["token"].as_str().expect("token").to_string(),
    )
}

pub fn player(name: &str, team: &str, position: &str) -> Value {
    serde_json::json!({ "player": { "name": name, "team": team, "position": position } })
}
