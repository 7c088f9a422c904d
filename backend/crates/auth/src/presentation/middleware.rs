//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::application::AuthenticationStatusUseCase;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::{Authenticator, SessionStore};
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Principal of the current request, inserted by [`require_authenticated`]
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl<St> FromRequestParts<St> for CurrentPrincipal
where
    St: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentPrincipal>()
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }
}

/// Middleware that requires a live session binding
///
/// Unlike the status endpoint, a session store failure is an error here.
pub async fn require_authenticated<A, S>(
    State(state): State<AuthAppState<A, S>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    A: Authenticator + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let current = state.session_context(req.headers());

    let principal = AuthenticationStatusUseCase::new(state.sessions.clone())
        .current_principal(&current)
        .await?
        .ok_or(AuthError::Unauthenticated)?;

    req.extensions_mut().insert(CurrentPrincipal(principal));

    Ok(next.run(req).await)
}
