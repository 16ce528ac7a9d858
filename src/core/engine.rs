use crate::core::Pipeline;
use crate::domain::model::CycleReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub struct AlertEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AlertEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let aircraft = self.pipeline.extract().await?;
        let aircraft_seen = aircraft.len();
        tracing::debug!("Extracted {} aircraft", aircraft_seen);

        let sightings = self.pipeline.transform(aircraft).await?;
        let report = self.pipeline.load(sightings).await?;

        Ok(CycleReport {
            aircraft_seen,
            ..report
        })
    }

    /// Poll every `interval` until Ctrl-C, or until `max_cycles` cycles have run.
    pub async fn run(&self, interval: Duration, max_cycles: Option<u64>) -> u64 {
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };
        self.run_until(interval, max_cycles, shutdown).await
    }

    /// Like [`AlertEngine::run`] with a caller-supplied shutdown signal.
    ///
    /// Returns the number of cycles executed. A failing cycle is logged and
    /// the loop carries on with the next tick.
    pub async fn run_until<F>(&self, interval: Duration, max_cycles: Option<u64>, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);
        if self.monitor.is_enabled() {
            tracing::info!("🔍 System monitoring enabled");
        }

        let mut cycles = 0u64;
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("🛑 Shutdown requested, stopping monitor");
                    break;
                }
                _ = ticker.tick() => {}
            }

            cycles += 1;
            match self.run_cycle().await {
                Ok(report) => {
                    tracing::debug!(
                        "Cycle {}: {} aircraft, {} in range, {} alerts sent, {} failed",
                        cycles,
                        report.aircraft_seen,
                        report.in_range,
                        report.alerts_sent,
                        report.alerts_failed
                    );
                }
                Err(e) if e.is_transient() => {
                    tracing::warn!("⚠️ Cycle {} skipped: {}", cycles, e);
                    tracing::warn!("💡 {}", e.recovery_suggestion());
                }
                Err(e) => {
                    tracing::error!(
                        "❌ Cycle {} failed: {} (Category: {:?}, Severity: {:?})",
                        cycles,
                        e,
                        e.category(),
                        e.severity()
                    );
                    tracing::error!("💡 {}", e.recovery_suggestion());
                }
            }
            self.monitor.log_cycle_stats(cycles);

            if max_cycles.is_some_and(|max| cycles >= max) {
                break;
            }
        }

        self.monitor.log_final_stats(cycles);
        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Aircraft, Sighting};
    use crate::utils::error::AlertError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails on every odd extract call, otherwise reports one aircraft and no sightings.
    #[derive(Default)]
    struct FlakyPipeline {
        extracts: AtomicUsize,
        loads: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Pipeline for FlakyPipeline {
        async fn extract(&self) -> Result<Vec<Aircraft>> {
            let call = self.extracts.fetch_add(1, Ordering::SeqCst);
            if call % 2 == 1 {
                return Err(AlertError::UpstreamStatus {
                    service: "OpenSky".to_string(),
                    status: 502,
                });
            }
            Ok(vec![Aircraft {
                icao24: "4ca7b5".to_string(),
                callsign: "RYR12AB".to_string(),
                origin_country: "Ireland".to_string(),
                position: None,
            }])
        }

        async fn transform(&self, _data: Vec<Aircraft>) -> Result<Vec<Sighting>> {
            Ok(Vec::new())
        }

        async fn load(&self, sightings: Vec<Sighting>) -> Result<CycleReport> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(CycleReport {
                in_range: sightings.len(),
                ..CycleReport::default()
            })
        }
    }

    #[tokio::test]
    async fn test_run_cycle_counts_aircraft() {
        let engine = AlertEngine::new(FlakyPipeline::default());
        let report = engine.run_cycle().await.unwrap();
        assert_eq!(report.aircraft_seen, 1);
        assert_eq!(report.in_range, 0);
    }

    #[tokio::test]
    async fn test_failed_cycle_skips_load() {
        let engine = AlertEngine::new(FlakyPipeline::default());
        engine.run_cycle().await.unwrap();
        assert!(engine.run_cycle().await.is_err());
        assert_eq!(engine.pipeline().loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_stops_after_max_cycles_despite_errors() {
        let engine = AlertEngine::new(FlakyPipeline::default());
        let cycles = engine
            .run_until(Duration::from_millis(5), Some(4), std::future::pending::<()>())
            .await;

        assert_eq!(cycles, 4);
        assert_eq!(engine.pipeline().extracts.load(Ordering::SeqCst), 4);
        assert_eq!(engine.pipeline().loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_monitored_run_keeps_going_on_transient_errors() {
        let engine = AlertEngine::new_with_monitoring(FlakyPipeline::default(), true);
        assert_eq!(engine.monitor.is_enabled(), cfg!(feature = "cli"));

        let cycles = engine
            .run_until(Duration::from_millis(5), Some(2), std::future::pending::<()>())
            .await;

        assert_eq!(cycles, 2);
        assert_eq!(engine.pipeline().loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let engine = AlertEngine::new(FlakyPipeline::default());
        let cycles = engine.run_until(Duration::from_secs(3600), None, async {}).await;
        // Shutdown is already resolved, but select! may still take the first immediate tick.
        assert!(cycles <= 1);
    }
}
