use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use models::{employee::Employee, patient::Patient, product::Product};
use service::{
    runtime,
    storage::{JsonFileStore, MemoryStore, ResourceStore, SeaOrmProductStore},
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router with CORS and request tracing applied, ready to serve.
pub fn app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Product backend: the relational table when a database is configured,
/// otherwise a process-local list.
async fn product_store(cfg: &AppConfig) -> anyhow::Result<Arc<dyn ResourceStore<Product>>> {
    if cfg.database.is_configured() {
        let db = models::db::connect_and_migrate(&cfg.database).await?;
        info!(event = "db_ready", "database connected and migrated");
        Ok(Arc::new(SeaOrmProductStore::new(db)))
    } else {
        warn!(event = "db_missing", "DATABASE_URL not set, products are kept in memory");
        Ok(Arc::new(MemoryStore::<Product>::new()))
    }
}

/// Open every backend described by `cfg` and seed the product catalogue.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    runtime::ensure_env(&cfg.storage.data_dir, &[cfg.storage.patients_file.as_str()]).await?;

    let products = product_store(cfg).await?;
    let patients: Arc<dyn ResourceStore<Patient>> =
        Arc::new(JsonFileStore::<Patient>::open(&cfg.storage.patients_file).await?);
    // 员工数据仅在进程内保存
    let employees: Arc<dyn ResourceStore<Employee>> = Arc::new(MemoryStore::<Employee>::new());

    let state = AppState::new(products, patients, employees);
    state.products.seed_if_empty(models::product::seed()).await?;
    Ok(state)
}

/// Build the app from `cfg` and serve until the process is stopped.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = app(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, event = "listening", "record services listening");
    axum::serve(listener, app).await?;
    Ok(())
}
