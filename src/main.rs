use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rust_consulta_api::config::Config;
use rust_consulta_api::handlers::{self, AppState};
use rust_consulta_api::lookup_client::CpfLookupClient;
use rust_consulta_api::views;

/// Main entry point for the application.
///
/// Initializes logging and configuration, builds the lookup client and
/// the HTTP routes with their middleware (CORS, rate limiting, body
/// size limit), and starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_consulta_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the lookup client once; it is shared by every request
    let lookup = CpfLookupClient::new(
        config.lookup_base_url.clone(),
        config.lookup_token.clone(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize lookup client: {}", e))?;
    tracing::info!("Lookup client initialized: {}", config.lookup_base_url);

    // Build application state
    let app_state = Arc::new(AppState {
        config: config.clone(),
        lookup,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected routes with security layers
    let protected_routes = Router::new()
        // Views
        .route("/", get(views::landing))
        .route("/resultado", get(views::resultado))
        .route("/recebimento", get(views::recebimento))
        // Consultation flow
        .route("/consultar", post(handlers::consultar_submit))
        // Lookup proxy endpoint
        .route("/api/consulta-cpf", get(handlers::consulta_cpf))
        .layer(
            ServiceBuilder::new()
                // Request size limit: the only body is a tiny CPF form
                .layer(RequestBodyLimitLayer::new(64 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Build final app with health check (bypasses rate limiting)
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
