//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;

use admin::{
    FileAdminConfigRepository, InMemorySessionStore, SharedSessionStore,
    domain::repository::AdminConfigRepository,
};
use axum::Router;
use config::{AppConfig, StorageBackend};
use enrollment::{JsonFileStore, SqliteStore, read_submissions_file};
use enrollment::infra::json_file::SUBMISSIONS_FILE;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,admin=info,enrollment=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tokio::fs::create_dir_all(&config.data_dir).await?;

    // Sessions live for the lifetime of the process
    let sessions: SharedSessionStore = Arc::new(InMemorySessionStore::new());

    // Create admin.json on first boot; a broken file is reported per request
    let admin_repo = FileAdminConfigRepository::new(&config.data_dir, config.admin_defaults.clone());
    if let Err(e) = admin_repo.load().await {
        tracing::warn!(error = %e, "Admin config unavailable at startup, continuing anyway");
    }

    let app: Router = match config.backend {
        StorageBackend::Json => {
            let store = JsonFileStore::open(&config.data_dir, config.store_options()).await?;
            tracing::info!("Using JSON file storage");
            app::build_router(store, admin_repo, sessions, config.enrollment_config())
        }
        StorageBackend::Sqlite => {
            let store =
                SqliteStore::connect(&config.database_url, &config.data_dir, config.store_options())
                    .await?;
            tracing::info!("Connected to database");

            // Carry over submissions left by the file store
            // Errors here should not prevent server startup
            let legacy_file = config.data_dir.join(SUBMISSIONS_FILE);
            if legacy_file.exists() {
                match read_submissions_file(&legacy_file, config.read_policy).await {
                    Ok(legacy) if !legacy.is_empty() => {
                        if let Err(e) = store.import(&legacy).await {
                            tracing::warn!(error = %e, "Submission import failed, continuing anyway");
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "Could not read legacy submissions file");
                    }
                }
            }

            app::build_router(store, admin_repo, sessions, config.enrollment_config())
        }
    };

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(app::cors_layer(config.frontend_origins.as_deref()));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
