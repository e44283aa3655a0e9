use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig, StorageBackend};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;
use service::{
    metrics,
    runtime,
    storage::{JsonFileStore, QuestionStore, SeaOrmQuestionStore},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Open the configured store handle.
///
/// The table backend's pool is lazy; an unreachable database is logged and
/// the schema is prepared on the first successful operation instead.
pub async fn open_store(cfg: &AppConfig) -> anyhow::Result<Arc<dyn QuestionStore>> {
    match cfg.storage.backend {
        StorageBackend::File => {
            let store: Arc<dyn QuestionStore> = JsonFileStore::new(&cfg.storage.data_file);
            info!(backend = "file", path = %cfg.storage.data_file, "question store opened");
            Ok(store)
        }
        StorageBackend::Table => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            let table = SeaOrmQuestionStore::new(db);
            if let Err(e) = table.ensure_schema().await {
                warn!(backend = "table", error = %e, "database not ready at startup; will retry on first request");
            }
            info!(backend = "table", "question store opened");
            let store: Arc<dyn QuestionStore> = table;
            Ok(store)
        }
    }
}

pub fn build_app(store: Arc<dyn QuestionStore>, static_dir: &str) -> Router {
    routes::build_router(AppState::new(store), build_cors(), static_dir)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only by process kill");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining in-flight requests");
}

/// Public entry: open the store, build the app and run the HTTP server
/// until Ctrl+C, then close the store.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let data_file = match cfg.storage.backend {
        StorageBackend::File => Some(cfg.storage.data_file.as_str()),
        StorageBackend::Table => None,
    };
    runtime::ensure_env(&cfg.server.static_dir, data_file).await?;

    let store = open_store(&cfg).await?;

    if let Some(admin_addr) = cfg.admin.addr.as_deref() {
        start_admin(admin_addr).await?;
    }

    let app = build_app(Arc::clone(&store), &cfg.server.static_dir);

    let addr = bind_addr(&cfg.server)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, backend = %cfg.storage.backend, static_dir = %cfg.server.static_dir, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!(event = "stopped", "server stopped");
    Ok(())
}

async fn start_admin(addr: &str) -> anyhow::Result<()> {
    common::admin_http::spawn_admin_server(addr, metrics::encode_metrics).await?;
    Ok(())
}
