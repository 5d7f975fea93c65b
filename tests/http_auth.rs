mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{TimeDelta, Utc};
use messenger_auth::services::auth::Role;
use tower::ServiceExt;

use common::{read_body_json, test_app};

fn get_with_auth(uri: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_needs_no_token() {
    let (app, _) = test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn me_with_valid_token_returns_identity() {
    let (app, state) = test_app();
    let token = state
        .auth
        .issue_token("alice", &[Role::Users, Role::Admin], None)
        .unwrap();

    let response = app
        .oneshot(get_with_auth("/api/v1/auth/me", &format!("Bearer {token}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body_json(response.into_body()).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["authorities"], serde_json::json!(["USERS", "ADMIN"]));
    assert_eq!(body["guest"], false);
}

#[tokio::test]
async fn lowercase_scheme_is_treated_as_no_token() {
    let (app, state) = test_app();
    let token = state.auth.issue_token("alice", &[Role::Users], None).unwrap();

    let response = app
        .oneshot(get_with_auth("/api/v1/auth/me", &format!("bearer {token}")))
        .await
        .unwrap();

    // The middleware lets it through; the extractor finds no identity.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_body_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() {
    let (app, _) = test_app();

    let response = app
        .oneshot(get_with_auth("/api/v1/auth/me", "Bearer not.a.token"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let (app, state) = test_app();
    let issued_at = Utc::now() - TimeDelta::days(1) - TimeDelta::minutes(5);
    let token = state
        .auth
        .issue_token("bob", &[Role::Users], Some(issued_at))
        .unwrap();

    let response = app
        .oneshot(get_with_auth("/api/v1/auth/me", &format!("Bearer {token}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn guest_anywhere_in_roles_yields_guest_identity() {
    let (app, state) = test_app();
    let token = state
        .auth
        .issue_token("carol", &[Role::Admin, Role::Guest], None)
        .unwrap();

    let response = app
        .oneshot(get_with_auth("/api/v1/auth/me", &format!("Bearer {token}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body_json(response.into_body()).await;
    assert_eq!(body["username"], "carol");
    assert_eq!(body["guest"], true);
    assert_eq!(body["authorities"], serde_json::json!([]));
}

#[tokio::test]
async fn validate_endpoint_true_or_unauthorized() {
    let (app, state) = test_app();
    let token = state.auth.issue_token("dave", &[Role::Users], None).unwrap();

    let ok = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/validate",
            serde_json::json!({ "token": token }),
        ))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(read_body_json(ok.into_body()).await["valid"], true);

    let bad = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/validate",
            serde_json::json!({ "token": "garbage" }),
        ))
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);

    let missing = app
        .oneshot(post_json("/api/v1/auth/validate", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn touch_reissues_with_same_expiry() {
    let (app, state) = test_app();
    let issued_at = Utc::now() - TimeDelta::hours(2);
    let token = state
        .auth
        .issue_token("erin", &[Role::Users], Some(issued_at))
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/touch")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body_json(response.into_body()).await;
    assert_eq!(body["token_type"], "Bearer");

    let renewed = body["access_token"].as_str().unwrap();
    let old = state.auth.get_claims(Some(&token)).unwrap().unwrap();
    let new = state.auth.get_claims(Some(renewed)).unwrap().unwrap();
    assert_eq!(new.sub, "erin");
    assert_eq!(new.exp, old.exp);

    let expires_in = body["expires_in"].as_u64().unwrap();
    assert!(expires_in <= 22 * 3600);
    assert!(expires_in > 21 * 3600);
}

#[tokio::test]
async fn touch_is_forbidden_for_guests() {
    let (app, state) = test_app();
    let token = state.auth.issue_token("frank", &[Role::Guest], None).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/touch")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

fn sign_raw(claims: serde_json::Value) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(common::SECRET.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn legacy_role_objects_resolve_as_guest() {
    let (app, _) = test_app();
    let token = sign_raw(serde_json::json!({
        "sub": "alice",
        "auth": [{ "authority": "ADMIN" }],
        "exp": (Utc::now() + TimeDelta::hours(1)).timestamp(),
    }));

    let response = app
        .oneshot(get_with_auth("/api/v1/auth/me", &format!("Bearer {token}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body_json(response.into_body()).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["guest"], true);
}

#[tokio::test]
async fn touch_accepts_token_without_issued_at() {
    let (app, state) = test_app();
    let exp = (Utc::now() + TimeDelta::hours(3)).timestamp();
    let token = sign_raw(serde_json::json!({ "sub": "gail", "auth": ["USERS"], "exp": exp }));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/touch")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body_json(response.into_body()).await;
    let renewed = state
        .auth
        .get_claims(body["access_token"].as_str())
        .unwrap()
        .unwrap();
    assert_eq!(renewed.sub, "gail");
    assert_eq!(renewed.exp, exp);
    assert!(renewed.last_message_timestamp > 0);
}
