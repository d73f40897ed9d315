use anyhow::{Context, Result};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::{Config, LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Output layer for one log format. Pretty and json carry thread ids and
/// source locations; compact is a single line per event.
fn format_layer(format: LogFormat) -> BoxedLayer {
    let base = fmt::layer().with_target(true);
    match format {
        LogFormat::Pretty => base
            .pretty()
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => base
            .json()
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_list(true)
            .flatten_event(true)
            .boxed(),
        LogFormat::Compact => base.compact().boxed(),
    }
}

/// Initialize the tracing subscriber; `RUST_LOG` wins over the configured level
pub fn init_telemetry(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .context("Invalid log level configuration")?;

    Registry::default()
        .with(format_layer(config.format))
        .with(env_filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        log_level = %config.level,
        log_format = ?config.format,
        "Mock server logging ready"
    );

    Ok(())
}

pub fn log_startup_info(config: &Config) {
    tracing::info!(
        server_address = %config.server_address(),
        variant = %config.server.variant,
        document_root = %config.server.document_root.display(),
        "NCD mock server starting up"
    );
}

pub fn log_shutdown_info() {
    tracing::info!("NCD mock server shutting down gracefully");
}

pub fn log_config_validation(config: &Config) {
    match config.validate() {
        Ok(()) => {
            tracing::info!("Configuration validation passed");
        }
        Err(e) => {
            tracing::error!(error = %e, "Configuration validation failed");
        }
    }
}

/// Log an error and its cause chain
pub fn report_error(error: &anyhow::Error, context: &str) {
    tracing::error!(
        error = %error,
        context = context,
        "Operation failed"
    );

    for (depth, cause) in error.chain().skip(1).enumerate() {
        tracing::error!(
            error = %cause,
            depth = depth + 1,
            "Error cause"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        for (raw, expected) in [
            ("\"pretty\"", LogFormat::Pretty),
            ("\"json\"", LogFormat::Json),
            ("\"compact\"", LogFormat::Compact),
        ] {
            let format: LogFormat = serde_json::from_str(raw).unwrap();
            assert_eq!(format, expected);
        }
        assert!(serde_json::from_str::<LogFormat>("\"xml\"").is_err());
    }

    #[test]
    fn test_format_layer_for_every_format() {
        for format in [LogFormat::Pretty, LogFormat::Json, LogFormat::Compact] {
            let subscriber = Registry::default().with(format_layer(format));
            tracing::subscriber::with_default(subscriber, || {
                tracing::info!(?format, "format layer smoke event");
            });
        }
    }

    #[test]
    fn test_init_telemetry_rejects_bad_filter() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig {
            level: "mock_http=verbose".to_string(),
            format: LogFormat::Compact,
        };
        assert!(init_telemetry(&config).is_err());
    }

    #[test]
    fn test_report_error_walks_chain() {
        let error = anyhow::anyhow!("bind failed").context("Failed to start server");
        report_error(&error, "startup");
        assert_eq!(error.chain().count(), 2);
    }
}
