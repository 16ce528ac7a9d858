use crate::utils::error::{AlertError, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

pub const LOG_FILE_NAME: &str = "aircraft.log";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

const DEFAULT_FILTER: &str = "aircraft_alert=info";
const VERBOSE_FILTER: &str = "aircraft_alert=debug,info";

fn default_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

fn timer() -> ChronoLocal {
    ChronoLocal::new(TIME_FORMAT.to_string())
}

/// One output layer: `YYYY-MM-DD HH:MM:SS LEVEL message` lines, or JSON lines.
fn format_layer<W>(format: LogFormat, writer: W, ansi: bool) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(ansi)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_timer(timer())
        .with_writer(writer);

    match format {
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Log to stdout and append to `<log_dir>/aircraft.log`.
///
/// Returns the path of the log file.
pub fn init_cli_logger(verbose: bool, log_dir: &Path, format: LogFormat) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    let layers = vec![
        format_layer(format, std::io::stdout, true),
        format_layer(format, Mutex::new(file), false),
    ];

    tracing_subscriber::registry()
        .with(layers)
        .with(default_filter(verbose))
        .try_init()
        .map_err(|e| AlertError::ConfigError {
            message: format!("Failed to install logger: {}", e),
        })?;

    Ok(log_path)
}
