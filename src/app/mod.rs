//! Wires resolved [`Settings`] to the live HTTP adapters.

use crate::adapters::{LogNotifier, OpenSkyClient, PostcodesIoGeocoder, PushoverNotifier};
use crate::config::Settings;
use crate::core::engine::AlertEngine;
use crate::core::pipeline::AlertPipeline;
use crate::core::{ConfigProvider, Geocoder, Notifier};
use crate::domain::classify::{AlertPolicy, Favourites};
use crate::domain::model::Coordinates;
use crate::utils::error::Result;

pub type LivePipeline = AlertPipeline<OpenSkyClient, Box<dyn Notifier>, Settings>;
pub type LiveEngine = AlertEngine<LivePipeline>;

pub async fn locate(settings: &Settings) -> Result<Coordinates> {
    let geocoder = PostcodesIoGeocoder::new(settings.endpoints.postcodes_url.clone())?;
    let center = geocoder.locate(&settings.postcode).await?;
    tracing::info!(
        "📍 {} resolved to ({:.4}, {:.4})",
        settings.postcode,
        center.lat,
        center.lon
    );
    Ok(center)
}

pub fn build_notifier(settings: &Settings) -> Result<Box<dyn Notifier>> {
    match &settings.pushover {
        Some(credentials) => Ok(Box::new(PushoverNotifier::new(
            settings.endpoints.pushover_url.clone(),
            credentials.clone(),
        )?)),
        None => {
            tracing::warn!("PUSHOVER_USER / PUSHOVER_TOKEN not set, alerts will only be logged");
            Ok(Box::new(LogNotifier))
        }
    }
}

/// Resolve the postcode and assemble the engine. Fails if the postcode cannot be located.
pub async fn build_engine(settings: Settings) -> Result<LiveEngine> {
    let center = locate(&settings).await?;

    let favourites = settings
        .favourites_file
        .as_ref()
        .map(Favourites::load_or_empty)
        .unwrap_or_default();
    let policy = AlertPolicy::new(settings.military.clone(), favourites);

    let source = OpenSkyClient::new(settings.endpoints.opensky_url.clone(), settings.opensky.clone())?;
    if !source.is_authenticated() {
        tracing::warn!("OPENSKY_USERNAME not set, using anonymous (rate limited) access");
    }
    let notifier = build_notifier(&settings)?;
    let monitor_enabled = settings.monitor;

    let pipeline = AlertPipeline::new(center, settings, source, notifier, policy);
    tracing::debug!("Polling bounds: {:?}", pipeline.bounds());

    Ok(AlertEngine::new_with_monitoring(pipeline, monitor_enabled))
}

/// Run until Ctrl-C (or one cycle with `once`). Returns the number of cycles.
pub async fn run(settings: Settings) -> Result<u64> {
    let engine = build_engine(settings).await?;
    let config = engine.pipeline().config();

    tracing::info!(
        "📡 Monitoring {}km radius around {}",
        config.radius_km(),
        config.postcode()
    );

    let max_cycles = if config.once { Some(1) } else { None };
    Ok(engine.run(config.check_interval(), max_cycles).await)
}
