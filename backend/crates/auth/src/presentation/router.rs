//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::{Authenticator, SessionStore};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_authenticated;

/// Create the Auth router for any authenticator and session store
pub fn auth_router<A, S>(authenticator: A, sessions: S, config: AuthConfig) -> Router
where
    A: Authenticator + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    auth_router_with_state(AuthAppState::new(authenticator, sessions, config))
}

/// Create the Auth router from prepared state
pub fn auth_router_with_state<A, S>(state: AuthAppState<A, S>) -> Router
where
    A: Authenticator + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let me = protected(
        Router::new().route("/me", get(handlers::me)),
        state.clone(),
    );

    Router::new()
        .route("/login", post(handlers::login::<A, S>))
        .route("/logout", post(handlers::logout::<A, S>))
        .route("/authenticated", get(handlers::authenticated::<A, S>))
        .with_state(state)
        .merge(me)
}

/// Put `routes` behind [`require_authenticated`]
pub fn protected<A, S>(routes: Router, state: AuthAppState<A, S>) -> Router
where
    A: Authenticator + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    routes.route_layer(from_fn_with_state(state, require_authenticated::<A, S>))
}
