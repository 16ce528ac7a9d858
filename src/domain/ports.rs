use crate::domain::model::{Aircraft, BoundingBox, Coordinates, CycleReport, Sighting};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Resolves a postcode to a point.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, postcode: &str) -> Result<Coordinates>;
}

/// Live aircraft positions inside a bounding box.
#[async_trait]
pub trait AircraftSource: Send + Sync {
    async fn fetch_aircraft(&self, bounds: &BoundingBox) -> Result<Vec<Aircraft>>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, message: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn postcode(&self) -> &str;
    fn radius_km(&self) -> f64;
    fn check_interval(&self) -> Duration;
    /// Bounding box to poll for a monitor centred on `center`.
    fn query_bounds(&self, center: Coordinates) -> BoundingBox;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Aircraft>>;
    async fn transform(&self, data: Vec<Aircraft>) -> Result<Vec<Sighting>>;
    async fn load(&self, sightings: Vec<Sighting>) -> Result<CycleReport>;
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Box<T> {
    async fn notify(&self, title: &str, message: &str) -> Result<()> {
        (**self).notify(title, message).await
    }
}
