use anyhow::{Context, Result};
use clap::Parser;
use mock_core::Variant;
use mock_server::config::{Config, Overrides};
use mock_server::setup::initialize_app;
use mock_server::telemetry::{
    init_telemetry, log_config_validation, log_shutdown_info, log_startup_info, report_error,
};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ncd-mock-server")]
#[command(about = "Local mock of the NCD API with static file serving")]
#[command(version)]
struct Cli {
    /// Port to listen on (defaults to 6000/7000/9000 by variant)
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Fixture variant: minimal, standard or admin
    #[arg(long)]
    variant: Option<Variant>,

    /// Listen address override
    #[arg(long, env = "LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Directory to serve static files from
    #[arg(long)]
    document_root: Option<PathBuf>,

    /// Log level override
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            port: self.port,
            variant: self.variant,
            listen_addr: self.listen_addr.clone(),
            document_root: self.document_root.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(config_file) => Config::from_file(config_file)
            .with_context(|| format!("Failed to load configuration from {config_file}"))?,
        None => Config::from_env()?,
    };

    config.apply_overrides(&cli.overrides());
    Ok(config)
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(&cli).context("Failed to load configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;

    log_config_validation(&config);
    config.validate().context("Invalid configuration")?;

    log_startup_info(&config);

    let server = initialize_app(&config).context("Failed to initialize application")?;

    let addr = config.server_address();
    if let Err(e) = server.serve_with_shutdown(&addr, shutdown_signal()).await {
        let error = anyhow::Error::new(e).context(format!("Mock server failed on {addr}"));
        report_error(&error, "serve");
        return Err(error);
    }

    log_shutdown_info();
    Ok(())
}
