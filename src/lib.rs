pub mod api;
pub mod classifier;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod tls;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::classifier::{ChatClassifier, RelevanceClassifier};
use crate::config::Config;
use crate::db::{Database, Store};
use crate::error::AppError;
use crate::tls::TlsProfile;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Absent when no classifier endpoint is configured
    pub classifier: Option<Arc<dyn RelevanceClassifier>>,
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    let mut options: PgConnectOptions = config
        .database
        .url
        .parse()
        .context("Invalid DATABASE_URL")?;

    if let Some(tls) = &config.database.tls {
        let profile = TlsProfile::load(tls)
            .await
            .with_context(|| format!("Failed to register TLS profile '{}'", tls.profile))?;
        tracing::info!("Database TLS profile '{}' ({:?})", profile.name, profile.ssl_mode);
        options = profile.apply(options);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.database.idle_timeout_secs))
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        "Database pool: max={}, min={} connections",
        config.database.max_connections,
        config.database.min_connections
    );

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations completed successfully");

    let classifier = ChatClassifier::from_config(&config.classifier)?.map(|c| {
        tracing::info!("Relevance classifier enabled (model: {})", c.model());
        Arc::new(c) as Arc<dyn RelevanceClassifier>
    });
    if classifier.is_none() {
        tracing::warn!("CLASSIFIER_API_URL not set - /api/posts/filter will return 503");
    }

    let state = AppState {
        store: Arc::new(Database::new(pool)),
        classifier,
    };

    let app = build_router(state, &config.security.cors_origins);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid HOST/PORT")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Backend server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Build the full application router with middleware
pub fn build_router(state: AppState, cors_origins: &str) -> Router {
    Router::new()
        // Health check
        .route("/health", api::get_only(health_check))
        // Ready check (includes store connectivity)
        .route("/ready", api::get_only(ready_check))
        .merge(api::router())
        .method_not_allowed_fallback(api::method_not_allowed)
        .fallback(api::not_found)
        // Middleware layers (order matters - applied bottom to top)
        // CorsLayer answers every OPTIONS itself; these cover the other responses
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,POST,OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        ))
        .layer(build_cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}

/// Build CORS layer from a comma-separated origin list, or `*` for any origin
fn build_cors_layer(origins: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.trim() == "*" {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    tracing::info!("CORS allowed origins: {:?}", allowed);
    cors.allow_origin(AllowOrigin::list(allowed))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Readiness check - verifies store connectivity
async fn ready_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<&'static str, AppError> {
    match state.store.ping().await {
        Ok(()) => Ok("ready"),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            Err(AppError::Unavailable("database unavailable".to_string()))
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
