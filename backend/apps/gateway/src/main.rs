//! Gateway Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `auth::AuthError` and `kernel::error::AppError`.

mod config;

use auth::domain::entity::UserAccount;
use auth::{
    InMemorySessionStore, InMemoryUserDirectory, PgAuthenticator, PgSessionStore, SessionStore,
    auth_router,
};
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env()?;

    let routes = match &config.database_url {
        Some(database_url) => postgres_routes(&config, database_url).await?,
        None => {
            tracing::warn!("DATABASE_URL not set, sessions and accounts are kept in memory");
            memory_routes(&config).await?
        }
    };

    let app = mount(&config.route_prefix, routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors(&config.frontend_origins));

    // Start server
    tracing::info!(
        addr = %config.listen_addr,
        prefix = %config.route_prefix,
        "Listening"
    );

    let listener = TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn postgres_routes(config: &GatewayConfig, database_url: &str) -> anyhow::Result<Router> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let sessions = PgSessionStore::new(pool.clone());

    // Startup cleanup: errors here should not prevent server startup
    match sessions.cleanup_expired().await {
        Ok(deleted) => {
            tracing::info!(sessions_deleted = deleted, "Session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }
    }

    let authenticator = PgAuthenticator::new(pool, config.password_pepper.clone());
    seed_postgres(&authenticator, config).await?;

    Ok(auth_router(authenticator, sessions, config.auth.clone()))
}

async fn seed_postgres(authenticator: &PgAuthenticator, config: &GatewayConfig) -> anyhow::Result<()> {
    for user in &config.seed_users {
        let account = UserAccount::register(
            &user.username,
            &user.email,
            user.password.clone(),
            config.password_pepper.as_deref(),
        )?;

        if authenticator.register(&account).await? {
            tracing::info!(username = %user.username, "Seeded account");
        } else {
            tracing::info!(username = %user.username, "Seed account already present");
        }
    }

    Ok(())
}

async fn memory_routes(config: &GatewayConfig) -> anyhow::Result<Router> {
    let directory = InMemoryUserDirectory::new(config.password_pepper.clone());

    for user in &config.seed_users {
        directory
            .register(&user.username, &user.email, user.password.clone())
            .await?;
        tracing::info!(username = %user.username, "Seeded account");
    }

    if directory.is_empty().await {
        tracing::warn!("No accounts configured, set GATEWAY_SEED_USERS to allow logins");
    }

    Ok(auth_router(
        directory,
        InMemorySessionStore::new(),
        config.auth.clone(),
    ))
}

/// Mount `routes` under `prefix`; an empty prefix or "/" mounts at the root
fn mount(prefix: &str, routes: Router) -> Router {
    let prefix = prefix.trim_end_matches('/');

    if prefix.is_empty() {
        routes
    } else if prefix.starts_with('/') {
        Router::new().nest(prefix, routes)
    } else {
        Router::new().nest(&format!("/{prefix}"), routes)
    }
}

fn cors(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app(prefix: &str) -> Router {
        mount(
            prefix,
            auth_router(
                InMemoryUserDirectory::default(),
                InMemorySessionStore::new(),
                auth::AuthConfig::development(),
            ),
        )
    }

    async fn status_text(app: Router, uri: &str) -> (StatusCode, String) {
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_mount_under_prefix() {
        let (status, text) = status_text(app("/auth"), "/auth/authenticated").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "You are not authenticated");

        let (status, _) = status_text(app("/auth"), "/authenticated").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_mount_at_root() {
        for prefix in ["", "/"] {
            let (status, _) = status_text(app(prefix), "/authenticated").await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_mount_prefix_without_slash() {
        let (status, _) = status_text(app("api/auth/"), "/api/auth/authenticated").await;
        assert_eq!(status, StatusCode::OK);
    }
}
