//! Contact Book Server - Main entry point

use anyhow::Result;
use contact_book_server::db::initialize_pool;
use contact_book_server::{
    router, run_server, AppState, Config, ContactRepository, ContactService, ContactServiceImpl,
    DeletionLog, FileDeletionLog, SqliteContactRepository,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Opening database at {} (pool size {})",
        config.database_path.display(),
        config.db_pool_size
    );

    let pool = initialize_pool(&config.database_path, config.db_pool_size)?;
    let repository = SqliteContactRepository::connect(pool)?;
    let repository = Arc::new(repository) as Arc<dyn ContactRepository>;

    let deletion_log =
        Arc::new(FileDeletionLog::new(&config.delete_log_path)) as Arc<dyn DeletionLog>;
    info!("Deletion log: {}", config.delete_log_path.display());

    let service =
        Arc::new(ContactServiceImpl::new(repository, deletion_log)) as Arc<dyn ContactService>;

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let app = router(AppState::new(service), config.cors_origin.clone());
    run_server(listener, app).await?;

    info!("Contact book server shutdown complete");
    Ok(())
}
