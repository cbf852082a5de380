//! # Key Vault Secret Function
//!
//! Custom handler process for the `getKeyVaultSecret` Azure Function.
//!
//! The Functions host starts this binary, passes the listening port in
//! `FUNCTIONS_CUSTOMHANDLER_PORT` and forwards HTTP triggers to
//! `/api/getKeyVaultSecret`. The function reads `demo-secret` from the vault in
//! `KEY_VAULT_URL` using the managed identity selected by `AZURE_CLIENT_ID`.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use keyvault_secret_function::config::LogFormat;
use keyvault_secret_function::observability::otel;
use keyvault_secret_function::runtime::{initialize, shutdown_signal, StartupOverrides};
use keyvault_secret_function::server::start_server;

#[derive(Debug, Parser)]
#[command(name = "keyvault-secret-function", version, about)]
struct Cli {
    /// Port to listen on (overrides FUNCTIONS_CUSTOMHANDLER_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Log format
    #[arg(long, value_enum, env = "LOG_FORMAT")]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Local development only; in Azure, settings come from app configuration
    let dotenv_path = dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let runtime = initialize(StartupOverrides {
        port: cli.port,
        log_format: cli.log_format,
    })?;

    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    start_server(
        runtime.server_config.port,
        runtime.server_state,
        shutdown_signal(),
    )
    .await?;

    info!("Function host stopped");

    otel::shutdown_otel(runtime.otel_tracer_provider);

    Ok(())
}
