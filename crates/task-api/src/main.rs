//! Task API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p task-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use task_common::{try_init_tracing, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    // Log format depends on APP_ENV; fall back to development output if the
    // configuration itself is broken so the error below is still visible
    let env = config
        .as_ref()
        .map_or(Environment::default(), |config| config.app.env);
    if let Err(e) = try_init_tracing(&TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.server.address(),
        storage = if config.database.is_some() { "postgres" } else { "memory" },
        "Configuration loaded"
    );

    task_api::run(config).await?;

    Ok(())
}
