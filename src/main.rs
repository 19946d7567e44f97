use std::sync::Arc;

use geodraw::config::{AppConfig, StoreBackend};
use geodraw::store::{DrawingStore, MemoryDrawingStore, PgDrawingStore};
use geodraw::{db, routes, state};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().expect("invalid configuration");

    let store: Arc<dyn DrawingStore> = match &config.store {
        StoreBackend::Postgres { database_url, max_connections } => {
            let pool = db::init_pool(database_url, *max_connections)
                .await
                .expect("database init failed");
            tracing::info!(max_connections, "drawings stored in postgres");
            Arc::new(PgDrawingStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("DATABASE_URL not set; drawings kept in memory only");
            Arc::new(MemoryDrawingStore::new())
        }
    };

    let state = state::AppState::new(store);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "geodraw listening");
    axum::serve(listener, app).await.expect("server failed");
}
