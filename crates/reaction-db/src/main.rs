//! Schema bootstrap entry point
//!
//! Run with:
//! ```bash
//! cargo run -p reaction-db --bin reaction-schema
//! ```
//!
//! Configuration is loaded from environment variables (or a `.env` file).

use anyhow::Context;
use reaction_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use reaction_db::{ensure_schema, DatabaseHandles};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::from_app_config(&config)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = ?e, "Schema bootstrap failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        "Configuration loaded"
    );

    let handles = DatabaseHandles::connect(&config.database)
        .await
        .context("failed to connect to the database")?;

    ensure_schema(handles.primary())
        .await
        .context("failed to create reaction schema")?;

    Ok(())
}
