//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticationStatusUseCase, LoginInput, LoginUseCase, LogoutUseCase, SessionContext,
    SessionTokenSigner,
};
use crate::domain::repository::{Authenticator, SessionStore};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, PrincipalResponse};
use crate::presentation::middleware::CurrentPrincipal;

/// Shared state for auth handlers
pub struct AuthAppState<A, S> {
    pub authenticator: Arc<A>,
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
    pub signer: Arc<SessionTokenSigner>,
}

// Manual impl: derive would require A: Clone and S: Clone.
impl<A, S> Clone for AuthAppState<A, S> {
    fn clone(&self) -> Self {
        Self {
            authenticator: self.authenticator.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
            signer: self.signer.clone(),
        }
    }
}

impl<A, S> AuthAppState<A, S>
where
    A: Authenticator + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    pub fn new(authenticator: A, sessions: S, config: AuthConfig) -> Self {
        Self::from_shared(Arc::new(authenticator), Arc::new(sessions), config)
    }

    /// Build state around collaborators the caller keeps a handle to
    pub fn from_shared(authenticator: Arc<A>, sessions: Arc<S>, config: AuthConfig) -> Self {
        Self {
            authenticator,
            sessions,
            signer: Arc::new(SessionTokenSigner::new(config.session_secret)),
            config: Arc::new(config),
        }
    }

    /// Decode the session cookie; a missing or forged cookie is anonymous
    pub fn session_context(&self, headers: &HeaderMap) -> SessionContext {
        let Some(token) = extract_cookie(headers, &self.config.session_cookie_name) else {
            return SessionContext::anonymous();
        };

        match self.signer.verify(&token) {
            Some(session_id) => SessionContext::for_session(session_id),
            None => {
                tracing::debug!("Ignoring session cookie with invalid signature");
                SessionContext::anonymous()
            }
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<A, S>(
    State(state): State<AuthAppState<A, S>>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    A: Authenticator + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| AuthError::Validation(rejection.body_text()))?;
    let current = state.session_context(&headers);

    let use_case = LoginUseCase::new(
        state.authenticator.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        identifier: req.identifier.unwrap_or_default(),
        secret: req.secret.unwrap_or_default(),
    };

    let output = use_case.execute(input, &current).await?;

    let token = state.signer.sign(&output.session_id);
    let cookie = state.config.cookie().build_set_cookie(&token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(PrincipalResponse::from(output.principal)),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /logout
pub async fn logout<A, S>(
    State(state): State<AuthAppState<A, S>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    A: Authenticator + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let current = state.session_context(&headers);

    LogoutUseCase::new(state.sessions.clone())
        .execute(&current)
        .await?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, state.config.cookie().build_delete_cookie())],
    ))
}

// ============================================================================
// Status
// ============================================================================

/// GET /authenticated
pub async fn authenticated<A, S>(
    State(state): State<AuthAppState<A, S>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    A: Authenticator + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let current = state.session_context(&headers);

    AuthenticationStatusUseCase::new(state.sessions.clone())
        .execute(&current)
        .await
        .message()
}

/// GET /me (behind `require_authenticated`)
pub async fn me(CurrentPrincipal(principal): CurrentPrincipal) -> Json<PrincipalResponse> {
    Json(PrincipalResponse::from(principal))
}
