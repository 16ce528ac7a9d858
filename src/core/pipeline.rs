use crate::core::tracker::AlertTracker;
use crate::core::{AircraftSource, ConfigProvider, Notifier, Pipeline};
use crate::domain::classify::AlertPolicy;
use crate::domain::model::{Aircraft, Alert, BoundingBox, Coordinates, CycleReport, Position, Sighting};
use crate::utils::error::Result;
use chrono::Local;
use std::collections::HashSet;
use tokio::sync::Mutex;

/// One poll cycle: fetch aircraft, keep qualifying ones in range, alert on new arrivals.
pub struct AlertPipeline<S: AircraftSource, N: Notifier, C: ConfigProvider> {
    source: S,
    notifier: N,
    config: C,
    policy: AlertPolicy,
    center: Coordinates,
    bounds: BoundingBox,
    tracker: Mutex<AlertTracker>,
}

impl<S: AircraftSource, N: Notifier, C: ConfigProvider> AlertPipeline<S, N, C> {
    pub fn new(center: Coordinates, config: C, source: S, notifier: N, policy: AlertPolicy) -> Self {
        let bounds = config.query_bounds(center);
        Self {
            source,
            notifier,
            config,
            policy,
            center,
            bounds,
            tracker: Mutex::new(AlertTracker::new()),
        }
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Number of aircraft currently suppressed because they were already alerted.
    pub async fn tracked(&self) -> usize {
        self.tracker.lock().await.len()
    }

    fn sighting_for(&self, aircraft: Aircraft) -> Option<Sighting> {
        let location = aircraft.position?;
        let position = Position::between(self.center, location);
        if position.distance_km > self.config.radius_km() {
            return None;
        }
        let reason = self.policy.reason_for(&aircraft)?;
        Some(Sighting {
            aircraft,
            position,
            reason,
        })
    }
}

#[async_trait::async_trait]
impl<S: AircraftSource, N: Notifier, C: ConfigProvider> Pipeline for AlertPipeline<S, N, C> {
    async fn extract(&self) -> Result<Vec<Aircraft>> {
        self.source.fetch_aircraft(&self.bounds).await
    }

    async fn transform(&self, data: Vec<Aircraft>) -> Result<Vec<Sighting>> {
        let mut sightings: Vec<Sighting> = data
            .into_iter()
            .filter_map(|aircraft| self.sighting_for(aircraft))
            .collect();
        sightings.sort_by(|a, b| a.position.distance_km.total_cmp(&b.position.distance_km));

        tracing::debug!(
            "{} qualifying aircraft within {}km",
            sightings.len(),
            self.config.radius_km()
        );
        Ok(sightings)
    }

    async fn load(&self, sightings: Vec<Sighting>) -> Result<CycleReport> {
        let mut tracker = self.tracker.lock().await;
        let mut report = CycleReport {
            in_range: sightings.len(),
            ..CycleReport::default()
        };
        let current: HashSet<String> = sightings.iter().map(|s| s.aircraft.icao24.clone()).collect();

        for sighting in sightings {
            if tracker.is_active(&sighting.aircraft.icao24) {
                continue;
            }

            let icao24 = sighting.aircraft.icao24.clone();
            let label = sighting.aircraft.label().to_string();
            let reason = sighting.reason;
            let alert = Alert::new(sighting, Local::now());
            let message = alert.message();
            tracing::info!("\n{}\n", message);

            match self.notifier.notify(alert.title(), &message).await {
                Ok(()) => report.alerts_sent += 1,
                Err(e) => {
                    tracing::error!("Error sending notification for {} ({}): {}", label, reason, e);
                    report.alerts_failed += 1;
                }
            }
            // Marked even on failure: no retry until the aircraft leaves and returns.
            tracker.mark_active(&icao24);
        }

        tracker.retain_only(&current);
        if !tracker.is_empty() {
            tracing::debug!("{} aircraft still in range", tracker.len());
        }
        Ok(report)
    }
}
