use patient_records_api::api::{self, AppState};
use patient_records_api::config::AppConfig;
use patient_records_api::storage::JsonStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Patient Records API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Data Path: {}", config.storage.data_path.display());
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Initialize patient store
    info!("💾 Initializing patient store...");
    let patient_store = Arc::new(JsonStore::new(&config.storage.data_path));
    patient_store.initialize()?;
    let patient_count = patient_store.count()?;
    info!("✅ Patient store ready ({} patients)", patient_count);

    // Create application state
    let state = AppState { patient_store };

    // Build router with modular routes
    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let port = std::env::var("PORT").unwrap_or_else(|_| config.server.port.to_string());
    let addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET    /                      - API banner");
    info!("   GET    /about                 - About message");
    info!("   GET    /health                - Health check");
    info!("   GET    /view                  - View all patients");
    info!("   GET    /patient/{{patient_id}}  - View one patient");
    info!("   GET    /sort                  - Sort by age/height/weight/bmi");
    info!("   POST   /create                - Create patient record");
    info!("   PUT    /edit/{{patient_id}}     - Update patient record");
    info!("   DELETE /delete/{{patient_id}}   - Delete patient record");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
