use clap::Parser;
use sort_fixup::{
    parse_delay, run, HttpMasterApi, RunOptions, DEFAULT_BASE_URL, DEPARTMENT_SORT_PLAN,
};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Set sortGroup/sortOrder for department master entries
#[derive(Parser)]
#[command(name = "set-department-sort", author, version, about, long_about = None)]
struct Args {
    /// Workers base URL
    #[arg(long, env = "NCD_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Only show actions without updating
    #[arg(long)]
    dry_run: bool,

    /// Delay between API calls (seconds)
    #[arg(long, default_value = "0.2", value_parser = parse_delay)]
    sleep: Duration,

    /// Log level for diagnostics on stderr
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

/// Diagnostics go to stderr; stdout carries one line per entry
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    info!(base_url = %args.base_url, dry_run = args.dry_run, "Starting department sort fixup");

    let api = match HttpMasterApi::new(&args.base_url) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };

    let options = RunOptions {
        dry_run: args.dry_run,
        delay: args.sleep,
    };
    let mut stdout = std::io::stdout();

    let result = tokio::select! {
        result = run(&api, DEPARTMENT_SORT_PLAN, &options, &mut stdout) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted");
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(summary) => {
            info!(planned = summary.planned, updated = summary.updated, "Department sort fixup finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Department sort fixup failed");
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
