use serde_json::json;
use std::sync::Arc;
use studypulse_core::{ApiError, Session, SessionCell, UserProfile};
use studypulse_interaction::dto::{
    LoginOutcome, LoginRequest, ProfileUpdateRequest, RegisterRequest,
};
use studypulse_interaction::testing::ScriptedTransport;
use studypulse_interaction::{ApiClient, HttpMethod, RequestOptions};

fn client() -> (Arc<ScriptedTransport>, SessionCell, ApiClient) {
    let transport = Arc::new(ScriptedTransport::new());
    let session = SessionCell::new();
    let client = ApiClient::new(transport.clone(), session.clone());
    (transport, session, client)
}

fn sign_in(session: &SessionCell) {
    session.replace(Session::new("jwt-token-12345", UserProfile::new("1", "testuser")));
}

#[tokio::test]
async fn test_anonymous_request_has_no_authorization_header() {
    let (transport, _session, client) = client();
    transport.respond(HttpMethod::Get, "/ping", 200, json!({"ok": true}));

    let body = client.request("/ping", RequestOptions::get()).await.unwrap();
    assert_eq!(body["ok"], true);

    let sent = &transport.requests()[0];
    assert_eq!(sent.header("Content-Type"), Some("application/json"));
    assert_eq!(sent.header("Authorization"), None);
}

#[tokio::test]
async fn test_bearer_token_follows_session() {
    let (transport, session, client) = client();
    transport.respond(HttpMethod::Get, "/friends", 200, json!({"friends": []}));

    sign_in(&session);
    client.friends().await.unwrap();
    session.clear();
    client.friends().await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].header("authorization"), Some("Bearer jwt-token-12345"));
    assert_eq!(requests[1].header("authorization"), None);
}

#[tokio::test]
async fn test_caller_headers_merge_over_defaults() {
    let (transport, session, client) = client();
    sign_in(&session);
    transport.respond(HttpMethod::Get, "/custom", 200, json!({}));

    client
        .request(
            "/custom",
            RequestOptions::get()
                .with_header("Content-Type", "text/plain")
                .with_header("X-Trace", "1"),
        )
        .await
        .unwrap();

    let sent = &transport.requests()[0];
    assert_eq!(sent.header("content-type"), Some("text/plain"));
    assert_eq!(sent.header("authorization"), Some("Bearer jwt-token-12345"));
    assert_eq!(sent.header("x-trace"), Some("1"));
}

#[tokio::test]
async fn test_transport_failure_surfaces_as_transport_error() {
    let (transport, _session, client) = client();
    transport.fail(HttpMethod::Get, "/friends");

    let err = client.friends().await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let (transport, _session, client) = client();
    transport.respond_raw(HttpMethod::Get, "/friends", 200, "<html>502 Bad Gateway</html>");

    let err = client.friends().await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_schema_mismatch_is_malformed() {
    let (transport, _session, client) = client();
    transport.respond(HttpMethod::Get, "/admin/dashboard", 200, json!({"stats": [1, 2]}));

    let err = client.admin_dashboard().await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unauthorized_only_for_authenticated_requests() {
    let (transport, session, client) = client();
    transport.respond(
        HttpMethod::Post,
        "/login",
        401,
        json!({"success": false, "detail": "帳號或密碼錯誤"}),
    );
    transport.respond(HttpMethod::Get, "/admin/users", 401, json!({"detail": "expired"}));

    let response = client
        .login(&LoginRequest {
            username: "a".to_string(),
            password: "b".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        response.into_outcome().unwrap(),
        LoginOutcome::Rejected {
            detail: Some("帳號或密碼錯誤".to_string())
        }
    );

    sign_in(&session);
    assert_eq!(client.admin_users().await.unwrap_err(), ApiError::Unauthorized);
}

#[tokio::test]
async fn test_login_while_signed_in_sends_no_bearer_token() {
    let (transport, session, client) = client();
    sign_in(&session);
    transport.respond(
        HttpMethod::Post,
        "/login",
        401,
        json!({"success": false, "detail": "帳號或密碼錯誤"}),
    );
    transport.respond(HttpMethod::Post, "/register", 400, json!({"detail": "taken"}));

    let response = client
        .login(&LoginRequest {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        response.into_outcome().unwrap(),
        LoginOutcome::Rejected {
            detail: Some("帳號或密碼錯誤".to_string())
        }
    );

    let envelope = client
        .register(&RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            display_name: "Alice".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(envelope.detail.as_deref(), Some("taken"));

    for sent in transport.requests() {
        assert_eq!(sent.header("Authorization"), None);
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
    }
    assert!(session.is_active());
}

#[tokio::test]
async fn test_acknowledged_endpoints_accept_empty_bodies() {
    let (transport, session, client) = client();
    sign_in(&session);
    transport.respond_raw(HttpMethod::Post, "/friends/accept/17", 200, "");
    transport.respond(HttpMethod::Put, "/user/profile", 200, json!({"success": true}));

    client.accept_friend_request("17").await.unwrap();
    client
        .update_profile(&ProfileUpdateRequest {
            display_name: "小明".to_string(),
            bio: "".to_string(),
            interests: vec!["math".to_string()],
        })
        .await
        .unwrap();

    let sent = transport.requests();
    assert_eq!(sent[1].body.as_ref().unwrap()["interests"], json!(["math"]));
}

#[tokio::test]
async fn test_data_endpoint_rejection_carries_detail() {
    let (transport, session, client) = client();
    sign_in(&session);
    transport.respond(
        HttpMethod::Post,
        "/friends/accept/3",
        404,
        json!({"success": false, "detail": "找不到好友請求"}),
    );

    let err = client.accept_friend_request("3").await.unwrap_err();
    assert_eq!(err, ApiError::Rejected("找不到好友請求".to_string()));
}
