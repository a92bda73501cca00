use wit_server::{AppState, build_router, logger};

use std::error::Error;
use std::time::Duration;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = wit_config::Config::load()?;
    config.validate()?;

    // Log file lives under the config dir
    let log_file_path = match config.logging.file {
        Some(ref filename) => Some(wit_config::Config::config_dir()?.join(filename)),
        None => None,
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting wit-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    let pool = wit_db::connect(&database_path, config.database.max_connections).await?;

    let app_state = AppState::new(pool.clone(), &config)?;
    let app = build_router(
        app_state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    pool.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}
