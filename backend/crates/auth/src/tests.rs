//! HTTP-level tests for the auth router
//! Every request goes through the full router, backed by the in-memory store
//! or by a store whose database is unavailable.

mod router_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use kernel::error::app_error::GENERIC_SERVER_MESSAGE;

    use crate::application::config::AuthConfig;
    use crate::domain::entity::User;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{email::Email, user_id::UserId};
    use crate::error::{AuthError, AuthResult};
    use crate::infra::InMemoryUserRepository;
    use crate::presentation::{AuthAppState, auth_router, auth_router_with_state};

    struct TestApp {
        router: Router,
        state: AuthAppState<InMemoryUserRepository>,
    }

    fn app() -> TestApp {
        let state = AuthAppState::new(InMemoryUserRepository::new(), AuthConfig::with_random_secret());
        TestApp {
            router: auth_router_with_state(state.clone()),
            state,
        }
    }

    async fn call(
        router: &Router,
        method: &str,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_string(&v).unwrap())
            }
            None => Body::empty(),
        };

        let resp = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn register(router: &Router, email: &str, password: &str) -> (StatusCode, Value) {
        call(
            router,
            "POST",
            "/auth/register",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    async fn login(router: &Router, email: &str, password: &str) -> (StatusCode, Value) {
        call(
            router,
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    async fn user_id_of(app: &TestApp, email: &str) -> String {
        let email = Email::new(email).unwrap();
        app.state
            .repo
            .find_by_email(&email)
            .await
            .unwrap()
            .unwrap()
            .user_id
            .to_string()
    }

    // ── Root ──

    #[tokio::test]
    async fn test_root() {
        let app = app();
        let (status, body) = call(&app.router, "GET", "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["msg"].is_string());
    }

    // ── Register ──

    #[tokio::test]
    async fn test_register_created() {
        let app = app();
        let (status, body) = call(
            &app.router,
            "POST",
            "/auth/register",
            None,
            Some(json!({ "name": "Ada", "email": "a@b.com", "password": "secret" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["msg"].is_string());
        assert!(body.get("token").is_none());
        assert!(!body.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let app = app();

        for payload in [
            json!({ "password": "secret" }),
            json!({ "email": "", "password": "secret" }),
            json!({ "email": "a@b.com" }),
            json!({ "email": "a@b.com", "password": "" }),
            json!({}),
        ] {
            let (status, body) =
                call(&app.router, "POST", "/auth/register", None, Some(payload)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body["msg"].is_string());
        }

        assert!(app.state.repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let app = app();
        let (status, _) = register(&app.router, "a@b.com", "secret").await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = register(&app.router, "A@b.com", "another").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["msg"], "This email is already in use");
        assert_eq!(app.state.repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_invalid_json() {
        let app = app();
        let req = Request::builder()
            .method("POST")
            .uri("/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let resp = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["msg"].is_string());
    }

    // ── Login ──

    #[tokio::test]
    async fn test_login_success() {
        let app = app();
        register(&app.router, "a@b.com", "secret").await;

        let (status, body) = login(&app.router, "a@b.com", "secret").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["msg"].is_string());

        let token = body["token"].as_str().unwrap();
        let claims = app.state.tokens.verify(token).unwrap();
        assert_eq!(claims.id, user_id_of(&app, "a@b.com").await);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = app();
        register(&app.router, "a@b.com", "secret").await;

        let (status, body) = login(&app.router, "a@b.com", "wrong").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["msg"], "Invalid password");
        assert!(body.get("token").is_none());
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let app = app();
        let (status, body) = login(&app.router, "nobody@b.com", "secret").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["msg"], "User does not exist");
    }

    #[tokio::test]
    async fn test_login_blank_email() {
        let app = app();
        let (status, body) = login(&app.router, "   ", "secret").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["msg"], "Email is required");
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let app = app();
        let (status, body) = call(
            &app.router,
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "a@b.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["msg"], "Password is required");
    }

    // ── Protected lookup ──

    #[tokio::test]
    async fn test_user_lookup_requires_token() {
        let app = app();
        let (status, body) = call(
            &app.router,
            "GET",
            "/user/6f1c2a53-64c4-4bb1-8d58-3e0f5b3f4a10",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["msg"].is_string());
    }

    #[tokio::test]
    async fn test_user_lookup_invalid_token() {
        let app = app();
        let (status, body) = call(
            &app.router,
            "GET",
            "/user/6f1c2a53-64c4-4bb1-8d58-3e0f5b3f4a10",
            Some("not.a.token"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Invalid token");
    }

    #[tokio::test]
    async fn test_user_lookup_other_scheme() {
        let app = app();
        let req = Request::builder()
            .uri("/user/6f1c2a53-64c4-4bb1-8d58-3e0f5b3f4a10")
            .header(header::AUTHORIZATION, "Token abc.def.ghi")
            .body(Body::empty())
            .unwrap();

        let resp = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_user_lookup_token_from_other_secret() {
        let app = app();
        let foreign = AuthConfig::with_random_secret()
            .token_service()
            .issue("6f1c2a53-64c4-4bb1-8d58-3e0f5b3f4a10")
            .unwrap();

        let (status, _) = call(
            &app.router,
            "GET",
            "/user/6f1c2a53-64c4-4bb1-8d58-3e0f5b3f4a10",
            Some(&foreign),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_user_lookup_not_found() {
        let app = app();
        register(&app.router, "a@b.com", "secret").await;
        let (_, body) = login(&app.router, "a@b.com", "secret").await;
        let token = body["token"].as_str().unwrap();

        let (status, body) = call(
            &app.router,
            "GET",
            "/user/6f1c2a53-64c4-4bb1-8d58-3e0f5b3f4a10",
            Some(token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], "User not found");

        let (status, _) = call(&app.router, "GET", "/user/not-an-id", Some(token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_full_flow_excludes_password() {
        let app = app();

        let (status, _) = register(&app.router, "a@b.com", "secret").await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = login(&app.router, "a@b.com", "secret").await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let id = user_id_of(&app, "a@b.com").await;
        let (status, body) = call(&app.router, "GET", &format!("/user/{id}"), Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["id"], id);
        assert_eq!(body["user"]["email"], "a@b.com");
        assert_eq!(body["user"]["name"], Value::Null);
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("passwordHash").is_none());
        assert!(!body.to_string().contains("argon2"));
    }

    // ── Storage failures ──

    /// Store whose backing database is gone
    #[derive(Clone)]
    struct UnavailableUserRepository;

    fn pool_closed<T>() -> AuthResult<T> {
        Err(AuthError::Database(sqlx::Error::PoolClosed))
    }

    impl UserRepository for UnavailableUserRepository {
        async fn create(&self, _user: &User) -> AuthResult<()> {
            pool_closed()
        }

        async fn find_by_id(&self, _user_id: &UserId) -> AuthResult<Option<User>> {
            pool_closed()
        }

        async fn find_by_email(&self, _email: &Email) -> AuthResult<Option<User>> {
            pool_closed()
        }

        // Lets registration reach `create`
        async fn exists_by_email(&self, _email: &Email) -> AuthResult<bool> {
            Ok(false)
        }
    }

    fn assert_generic_server_error(status: StatusCode, body: &Value) {
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["msg"], GENERIC_SERVER_MESSAGE);

        let rendered = body.to_string().to_lowercase();
        assert!(!rendered.contains("pool"));
        assert!(!rendered.contains("database"));
    }

    #[tokio::test]
    async fn test_storage_failure_on_register() {
        let router = auth_router(UnavailableUserRepository, AuthConfig::with_random_secret());
        let (status, body) = register(&router, "a@b.com", "secret").await;
        assert_generic_server_error(status, &body);
    }

    #[tokio::test]
    async fn test_storage_failure_on_login() {
        let router = auth_router(UnavailableUserRepository, AuthConfig::with_random_secret());
        let (status, body) = login(&router, "a@b.com", "secret").await;
        assert_generic_server_error(status, &body);
        assert!(body.get("token").is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_on_lookup() {
        let config = AuthConfig::with_random_secret();
        let token = config
            .token_service()
            .issue("6f1c2a53-64c4-4bb1-8d58-3e0f5b3f4a10")
            .unwrap();
        let router = auth_router(UnavailableUserRepository, config);

        let (status, body) = call(
            &router,
            "GET",
            "/user/6f1c2a53-64c4-4bb1-8d58-3e0f5b3f4a10",
            Some(&token),
            None,
        )
        .await;
        assert_generic_server_error(status, &body);
    }
}
