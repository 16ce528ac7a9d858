pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{FileConfig, Settings};
pub use core::{engine::AlertEngine, pipeline::AlertPipeline};
pub use utils::error::{AlertError, Result};
