mod cli;
mod run;

use clap::Parser;
use eyre::{Result, WrapErr};

use crate::cli::Args;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading config {}", path.display()))?;
            let cfg = blinds_config::load_toml(&content).wrap_err("parsing config")?;
            cfg.validate().wrap_err("invalid config")?;
            cfg
        }
        None => blinds_config::Config::default(),
    };

    init_logging(&cfg.logging);
    run::run(&args, &cfg)
}

/// Set up tracing: RUST_LOG wins, then the configured level, then "info".
/// Logs go to stderr (or a rolling file when configured) so stdout stays
/// reserved for the run summary.
fn init_logging(logging: &blinds_config::Logging) {
    use tracing_subscriber::EnvFilter;

    let default_level = logging.level.clone().unwrap_or_else(|| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match &logging.file {
        Some(file) => {
            let path = std::path::Path::new(file);
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => std::path::Path::new("."),
            };
            let name = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| "blinds.log".to_string());
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_writer(appender)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
