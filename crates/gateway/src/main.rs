//! SDGraph API Gateway
//!
//! The main entry point for all external API requests.
//! Handles:
//! - Bearer-token identity and current-user resolution
//! - Rate limiting
//! - Graph, chart and SDG reference routes
//! - Observability (logging, metrics)

mod handlers;
mod middleware;

use axum::{extract::FromRef, routing::get, Router};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use sdgraph_common::{
    auth::JwtManager,
    config::AppConfig,
    db::{CatalogStore, DbPool, Repository},
    errors::AppError,
    metrics,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{signal, sync::Notify};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::middleware::rate_limit::{rate_limit, RateLimitState};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn CatalogStore>,
    pub jwt: Arc<JwtManager>,
}

impl FromRef<AppState> for Arc<JwtManager> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;
    init_tracing(&config);

    info!(
        service = %config.observability.service_name,
        "Starting SDGraph API Gateway v{}",
        sdgraph_common::VERSION
    );

    config.validate_settings().map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        e
    })?;

    let config = Arc::new(config);

    // Initialize metrics
    if config.observability.metrics_port != 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                metrics::LATENCY_BUCKETS,
            )?
            .install()?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }
    metrics::register_metrics();

    // Initialize database connection
    info!("Connecting to database...");
    let db = DbPool::new(&config.database).await?;

    let jwt_secret = config.auth.jwt_secret.as_deref().ok_or_else(|| AppError::Configuration {
        message: "auth.jwt_secret must be set".to_string(),
    })?;

    // Create app state
    let state = AppState {
        config: config.clone(),
        store: Arc::new(Repository::new(db)),
        jwt: Arc::new(JwtManager::new(jwt_secret, config.auth.jwt_expiration_secs)),
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(listener, app).with_graceful_shutdown({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            shutdown.notify_one();
        }
    });

    let drain_deadline = async {
        shutdown.notified().await;
        tokio::time::sleep(config.shutdown_timeout()).await;
    };

    tokio::select! {
        result = server.into_future() => result?,
        _ = drain_deadline => warn!("Shutdown timeout elapsed, dropping open connections"),
    }

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.observability.json_logging {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Health endpoints (no auth)
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))

        // Graph endpoint
        .route("/graph-data", get(handlers::graph::graph_data))

        // Corpus endpoint
        .route("/publications", get(handlers::publications::list_publications))

        // Chart endpoints
        .route("/stats/sdg-counts", get(handlers::stats::sdg_counts))
        .route(
            "/stats/institution-distribution",
            get(handlers::stats::institution_distribution),
        )

        // Reference endpoints
        .route("/sdgs", get(handlers::reference::list_sdgs))
        .route("/sdgs/{sdg_id}", get(handlers::reference::get_sdg))
        .route("/sdg-mappings", get(handlers::reference::list_sdg_mappings))
        .route_layer(axum::middleware::from_fn(middleware::track_requests));

    let mut app = Router::new().nest("/api", api_routes);

    if state.config.rate_limit.enabled {
        let limiter = RateLimitState::from_config(&state.config.rate_limit);
        app = app.layer(axum::middleware::from_fn_with_state(limiter, rate_limit));
    }

    // Compose the app
    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(state.config.request_timeout()))
            .layer(cors),
    )
    .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
