//! Pairview server entrypoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use pairview::adapters::auth::JwtTokenVerifier;
use pairview::adapters::comms::{StreamComms, StreamCommsConfig};
use pairview::adapters::http::middleware::{auth_middleware, AuthState};
use pairview::adapters::http::{session_routes, SessionHandlers};
use pairview::adapters::postgres::{PostgresSessionReader, PostgresSessionRepository};
use pairview::application::handlers::session::{
    CreateSessionHandler, EndSessionHandler, GetSessionHandler, JoinSessionHandler,
    ListActiveSessionsHandler, ListMyRecentSessionsHandler,
};
use pairview::config::AppConfig;
use pairview::ports::{CommsProvider, SessionReader, SessionRepository, TokenVerifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let repository: Arc<dyn SessionRepository> =
        Arc::new(PostgresSessionRepository::new(pool.clone()));
    let reader: Arc<dyn SessionReader> = Arc::new(PostgresSessionReader::new(pool));

    let mut comms_config = StreamCommsConfig::new(
        config.comms.api_key.clone(),
        config.comms.api_secret.expose_secret().clone(),
    )
    .with_timeout(config.comms.request_timeout());
    if let Some(base_url) = &config.comms.base_url {
        comms_config = comms_config.with_base_url(base_url.clone());
    }
    let comms: Arc<dyn CommsProvider> = Arc::new(StreamComms::new(comms_config)?);

    let verifier: Arc<dyn TokenVerifier> =
        Arc::new(JwtTokenVerifier::new(config.auth.token_secret.clone()));

    let handlers = SessionHandlers::new(
        Arc::new(CreateSessionHandler::new(repository.clone(), comms.clone())),
        Arc::new(JoinSessionHandler::new(repository.clone(), comms.clone())),
        Arc::new(EndSessionHandler::new(repository.clone(), comms.clone())),
        Arc::new(GetSessionHandler::new(reader.clone())),
        Arc::new(ListActiveSessionsHandler::new(reader.clone())),
        Arc::new(ListMyRecentSessionsHandler::new(reader)),
    );

    let app = build_app(handlers, verifier, &config);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn build_app(handlers: SessionHandlers, verifier: AuthState, config: &AppConfig) -> Router {
    let origins = config.server.cors_origins_list();
    let cors = if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<http::HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(tower_http::cors::AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    };

    Router::new()
        .nest("/api/sessions", session_routes(handlers))
        .layer(middleware::from_fn_with_state(verifier, auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
}

/// Wait for a shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Signal received, starting graceful shutdown");
}
