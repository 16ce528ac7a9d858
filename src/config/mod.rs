pub mod settings;
pub mod toml_config;

pub use settings::{BoundsMode, Endpoints, Settings, DEFAULT_CHECK_INTERVAL_SECS, DEFAULT_RADIUS_KM};
pub use toml_config::FileConfig;

#[cfg(feature = "cli")]
use crate::utils::logger::LogFormat;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

/// Monitor military aircraft in your area.
///
/// Examples:
///   # Watch 20km around Buckingham Palace
///   aircraft-alert "SW1A 1AA"
///
///   # Wider radius, with a favourites list
///   aircraft-alert "M1 1AE" -r 50 -f favourites.txt
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "aircraft-alert")]
#[command(version, about = "Monitor military aircraft in your area")]
pub struct CliConfig {
    /// Postcode to monitor (required)
    pub postcode: String,

    /// Radius in kilometers to monitor (default: 20)
    #[arg(short = 'r', long, env = "RADIUS")]
    pub radius: Option<f64>,

    /// File path with favourite callsigns or ICAO identifiers, one per line
    #[arg(short = 'f', long, env = "FAVOURITES_FILE")]
    pub favourites: Option<PathBuf>,

    /// Seconds between polls (default: 120)
    #[arg(short = 'i', long, env = "CHECK_INTERVAL")]
    pub interval: Option<u64>,

    /// Path to a TOML config file (auto-loads aircraft-alert.toml if present)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Poll only a box around the radius instead of the whole UK
    #[arg(long)]
    pub auto_bounds: bool,

    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Directory for aircraft.log
    #[arg(long, env = "LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Log process CPU/memory after every cycle
    #[arg(long)]
    pub monitor: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
