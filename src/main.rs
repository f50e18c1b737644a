//! orders_manager entry point.
//!
//! ```text
//! $ orders_manager start
//! ```
//!
//! `start` runs the HTTP gateway and the background matching/settlement
//! driver loop side by side until the process is killed.

use std::sync::Arc;
use std::time::Duration;

use orders_manager::config::AppConfig;
use orders_manager::gateway::{self, AppState};
use orders_manager::settlement::LoggingSettlementExecutor;
use orders_manager::store::InMemoryOrderStore;
use orders_manager::{driver, logging};

fn print_usage() {
    println!("usage: orders_manager <command>");
    println!();
    println!("commands:");
    println!("  start      run the HTTP gateway and matching driver");
    println!("  version    print the build's git commit");
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("start") => start().await,
        Some("version") => println!("orders_manager {}", env!("GIT_HASH")),
        _ => print_usage(),
    }
}

async fn start() {
    let config = AppConfig::from_env();
    let _logging_guard = logging::init_logging(&config);

    tracing::info!(app = %config.app_name, port = config.app_port, "starting orders_manager");

    let store: Arc<InMemoryOrderStore> = Arc::new(InMemoryOrderStore::new());
    let executor = Arc::new(LoggingSettlementExecutor);

    if config.provider.is_none() {
        tracing::warn!("PROVIDER not set, settlement will only be logged, not executed on chain");
    }

    let driver_store = store.clone();
    let driver_executor = executor.clone();
    let interval = Duration::from_secs(config.driver_interval_secs.max(1) as u64);
    tokio::spawn(async move {
        driver::run(driver_store, driver_executor, interval).await;
    });

    let app = gateway::router(AppState { store });
    let addr = format!("0.0.0.0:{}", config.app_port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%addr, error = %err, "failed to bind HTTP listener");
            return;
        }
    };

    tracing::info!(%addr, "listening");
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "HTTP server exited with an error");
    }
}
