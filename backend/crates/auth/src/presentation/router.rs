//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_bearer_token};

/// Create the full application router for any repository implementation
///
/// | route | auth |
/// |---|---|
/// | `GET /` | none |
/// | `POST /auth/register` | none |
/// | `POST /auth/login` | none |
/// | `GET /user/{id}` | bearer token |
pub fn auth_router<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    auth_router_with_state(AuthAppState::new(repo, config))
}

/// Same as [`auth_router`] but with caller-built state, so tests can keep
/// handles on the repository and token service
pub fn auth_router_with_state<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let middleware_state = AuthMiddlewareState {
        tokens: state.tokens.clone(),
    };

    let protected = Router::new()
        .route("/user/{id}", get(handlers::get_user::<R>))
        .route_layer(middleware::from_fn_with_state(
            middleware_state,
            require_bearer_token,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/auth/register", post(handlers::register::<R>))
        .route("/auth/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}
