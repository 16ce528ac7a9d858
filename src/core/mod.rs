pub mod engine;
pub mod pipeline;
pub mod tracker;

pub use crate::domain::model::{Aircraft, CycleReport, Sighting};
pub use crate::domain::ports::{AircraftSource, ConfigProvider, Geocoder, Notifier, Pipeline};
pub use crate::utils::error::Result;
