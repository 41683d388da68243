//! Router tests for registration, login and bearer authentication
//!
//! Everything runs against the in-memory store through `oneshot`.

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use proptest::prelude::*;
    use tasklist_shared::AccessToken;
    use tower::ServiceExt;

    fn test_app() -> Router {
        create_router(AppState::in_memory(AppConfig::in_memory()))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn post_json(app: &Router, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    fn list_request(user_id: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("GET")
            .uri(format!("/api/v1/{}/tasks", user_id));
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn register(app: &Router, username: &str, password: &str) -> AccessToken {
        let body = format!(r#"{{"username":"{}","password":"{}"}}"#, username, password);
        let (status, body) = post_json(app, "/api/v1/register", &body).await;
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);
        serde_json::from_str(&body).unwrap()
    }

    #[tokio::test]
    async fn test_register_returns_token() {
        let app = test_app();
        let token = register(&app, "alice", "password123").await;

        assert_eq!(token.token.len(), 32);
        assert_eq!(token.user_id.len(), 32);
        assert!(token.expiry > chrono::Utc::now());
    }

    #[tokio::test]
    async fn test_register_response_shape() {
        let app = test_app();
        let body = r#"{"username":"alice","password":"password123"}"#;
        let (_, body) = post_json(&app, "/api/v1/register", body).await;

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let fields = value.as_object().unwrap();
        assert!(fields.contains_key("token"));
        assert!(fields.contains_key("user_id"));
        assert!(fields.contains_key("expiry"));
        assert!(!fields.contains_key("password"));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_bad_request() {
        let app = test_app();
        register(&app, "alice", "password123").await;

        let body = r#"{"username":"Alice","password":"different-password"}"#;
        let (status, body) = post_json(&app, "/api/v1/register", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Username already exists");
    }

    #[tokio::test]
    async fn test_register_rejects_short_fields() {
        let app = test_app();

        let (status, body) =
            post_json(&app, "/api/v1/register", r#"{"username":"abc","password":"password123"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Username"));

        let (status, body) =
            post_json(&app, "/api/v1/register", r#"{"username":"abcd","password":"short"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Password"));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_json() {
        let app = test_app();
        let (status, _) = post_json(&app, "/api/v1/register", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(&app, "/api/v1/register", r#"{"username":"alice"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_issues_new_token_and_revokes_old() {
        let app = test_app();
        let registered = register(&app, "alice", "password123").await;

        let (status, body) = post_json(
            &app,
            "/api/v1/login",
            r#"{"username":"ALICE","password":"password123"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let login: AccessToken = serde_json::from_str(&body).unwrap();
        assert_eq!(login.user_id, registered.user_id);
        assert_ne!(login.token, registered.token);

        let old = format!("Bearer {}", registered.token);
        let (status, body) = send(&app, list_request(&registered.user_id, Some(&old))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with("Token does not match saved token"));

        let new = format!("Bearer {}", login.token);
        let (status, _) = send(&app, list_request(&registered.user_id, Some(&new))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_failures_are_bad_request() {
        let app = test_app();
        register(&app, "alice", "password123").await;

        let (status, body) =
            post_json(&app, "/api/v1/login", r#"{"username":"ghost","password":"password123"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Username does not exist");

        let (status, body) =
            post_json(&app, "/api/v1/login", r#"{"username":"alice","password":"password124"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Incorrect password");

        let (status, _) =
            post_json(&app, "/api/v1/login", r#"{"username":"","password":"password123"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_auth_header_is_bad_request() {
        let app = test_app();
        let token = register(&app, "alice", "password123").await;

        let (status, _) = send(&app, list_request(&token.user_id, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_token_of_other_user_is_bad_request() {
        let app = test_app();
        let alice = register(&app, "alice", "password123").await;
        let bob = register(&app, "bobby", "password123").await;

        let header = format!("Bearer {}", alice.token);
        let (status, body) = send(&app, list_request(&bob.user_id, Some(&header))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, format!("Token does not match saved token for user {}", bob.user_id));
    }

    #[tokio::test]
    async fn test_user_without_token_is_bad_request() {
        let app = test_app();
        let alice = register(&app, "alice", "password123").await;

        let header = format!("Bearer {}", alice.token);
        let (status, body) = send(&app, list_request("nosuchuser", Some(&header))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "No token has been issued for user nosuchuser");
    }

    #[tokio::test]
    async fn test_scheme_is_case_insensitive() {
        let app = test_app();
        let token = register(&app, "alice", "password123").await;

        let header = format!("bEaReR {}", token.token);
        let (status, _) = send(&app, list_request(&token.user_id, Some(&header))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_user_path_is_not_found() {
        let app = test_app();
        let (status, _) = send(&app, list_request("not_an_id", Some("Bearer abc"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    /// Header values that never authenticate, with the start of the expected message
    fn header_strategy() -> impl Strategy<Value = (String, &'static str)> {
        prop_oneof![
            "[a-f0-9]{32}".prop_map(|t| (format!("Bearer {}", t), "No token has been issued")),
            "[a-f0-9]{32}".prop_map(|t| (t, "Bearer token not in proper format")),
            "[a-f0-9]{32}".prop_map(|t| (format!("Basic {}", t), "Bearer token not in proper format")),
            "[a-f0-9]{8}".prop_map(|t| (format!("Bearer {} {}", t, t), "Bearer token not in proper format")),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn prop_unauthenticated_requests_are_rejected((header, expected) in header_strategy()) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let app = test_app();
                let (status, body) = send(&app, list_request("abc123", Some(&header))).await;
                prop_assert_eq!(status, StatusCode::BAD_REQUEST);
                prop_assert!(body.starts_with(expected), "unexpected body: {}", body);
                Ok(())
            })?;
        }
    }
}
