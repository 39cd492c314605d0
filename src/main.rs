use credplane::{
    api::start_api_server,
    config::ObservabilityConfig,
    observability::{init_logging, log_config_info},
    startup, Config, Result, APP_NAME, VERSION,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "credplane terminated");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if it exists; must happen before any config is read
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    init_logging(&ObservabilityConfig::from_env())?;

    info!(app_name = APP_NAME, version = VERSION, "Starting credplane");

    let config = Config::from_env()?;
    log_config_info(&config);

    let state = startup::initialize(&config).await?;
    info!("Both backends are ready");

    let result = start_api_server(&config.api, state.connection_service).await;

    state.pool.close().await;
    info!("Database pool closed");
    result
}
