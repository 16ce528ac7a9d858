use crate::adapters::opensky::{OpenSkyCredentials, OPENSKY_URL};
use crate::adapters::postcodes::POSTCODES_IO_URL;
use crate::adapters::pushover::{PushoverCredentials, PUSHOVER_URL};
use crate::config::toml_config::{resolved, FileConfig};
use crate::domain::classify::MilitaryClassifier;
use crate::domain::model::{BoundingBox, Coordinates};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AlertError, Result};
use crate::utils::validation::{self, Validate};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_RADIUS_KM: f64 = 20.0;
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 120;
const MAX_RADIUS_KM: f64 = 500.0;
const MIN_CHECK_INTERVAL_SECS: u64 = 10;
const MAX_CHECK_INTERVAL_SECS: u64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsMode {
    Fixed(BoundingBox),
    /// Box around the monitored circle.
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub postcodes_url: String,
    pub opensky_url: String,
    pub pushover_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            postcodes_url: POSTCODES_IO_URL.to_string(),
            opensky_url: OPENSKY_URL.to_string(),
            pushover_url: PUSHOVER_URL.to_string(),
        }
    }
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub postcode: String,
    pub radius_km: f64,
    pub check_interval: Duration,
    pub favourites_file: Option<PathBuf>,
    pub bounds: BoundsMode,
    pub endpoints: Endpoints,
    pub opensky: Option<OpenSkyCredentials>,
    pub pushover: Option<PushoverCredentials>,
    pub military: MilitaryClassifier,
    pub once: bool,
    pub monitor: bool,
}

impl Settings {
    /// Built-in defaults for `postcode`, before any file or environment overlay.
    pub fn new(postcode: impl Into<String>) -> Self {
        Self {
            postcode: validation::normalize_postcode(&postcode.into()),
            radius_km: DEFAULT_RADIUS_KM,
            check_interval: Duration::from_secs(DEFAULT_CHECK_INTERVAL_SECS),
            favourites_file: None,
            bounds: BoundsMode::Fixed(BoundingBox::UK),
            endpoints: Endpoints::default(),
            opensky: None,
            pushover: None,
            military: MilitaryClassifier::default(),
            once: false,
            monitor: false,
        }
    }

    /// Overlay a config file on top of the current values.
    pub fn with_file(mut self, file: &FileConfig) -> Self {
        if let Some(radius) = file.monitor.radius_km {
            self.radius_km = radius;
        }
        if let Some(secs) = file.monitor.check_interval_secs {
            self.check_interval = Duration::from_secs(secs);
        }
        if let Some(path) = &file.monitor.favourites_file {
            self.favourites_file = Some(path.clone());
        }
        if let Some(bounds) = file.bounds {
            self.bounds = BoundsMode::Fixed(bounds);
        }
        if file.monitor.auto_bounds == Some(true) {
            self.bounds = BoundsMode::Auto;
        }

        if let Some(url) = resolved(file.endpoints.postcodes_url.as_ref()) {
            self.endpoints.postcodes_url = url;
        }
        if let Some(url) = resolved(file.endpoints.opensky_url.as_ref()) {
            self.endpoints.opensky_url = url;
        }
        if let Some(url) = resolved(file.endpoints.pushover_url.as_ref()) {
            self.endpoints.pushover_url = url;
        }

        if let Some(username) = resolved(file.opensky.username.as_ref()) {
            self.opensky = Some(OpenSkyCredentials {
                username,
                password: resolved(file.opensky.password.as_ref()),
            });
        }
        if let (Some(user), Some(token)) = (
            resolved(file.pushover.user.as_ref()),
            resolved(file.pushover.token.as_ref()),
        ) {
            self.pushover = Some(PushoverCredentials { user, token });
        }

        if let Some(military) = &file.military {
            self.military = military.clone();
        }
        self
    }

    /// Fill credentials not set by the config file from `OPENSKY_*` / `PUSHOVER_*`.
    pub fn with_env_credentials(self) -> Self {
        self.with_credentials_from(|name| std::env::var(name).ok())
    }

    fn with_credentials_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Secrets are taken verbatim; only an unset or all-blank variable counts as missing.
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if self.opensky.is_none() {
            if let Some(username) = get("OPENSKY_USERNAME") {
                self.opensky = Some(OpenSkyCredentials {
                    username,
                    password: get("OPENSKY_PASSWORD"),
                });
            }
        }
        if self.pushover.is_none() {
            if let (Some(user), Some(token)) = (get("PUSHOVER_USER"), get("PUSHOVER_TOKEN")) {
                self.pushover = Some(PushoverCredentials { user, token });
            }
        }
        self
    }

    /// CLI flags (and their env fallbacks) over the file over built-in defaults.
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &crate::config::CliConfig, file: Option<&FileConfig>) -> Self {
        let mut settings = Settings::new(&cli.postcode);
        if let Some(file) = file {
            settings = settings.with_file(file);
        }

        if let Some(radius) = cli.radius {
            settings.radius_km = radius;
        }
        if let Some(secs) = cli.interval {
            settings.check_interval = Duration::from_secs(secs);
        }
        if let Some(path) = &cli.favourites {
            settings.favourites_file = Some(path.clone());
        }
        if cli.auto_bounds {
            settings.bounds = BoundsMode::Auto;
        }
        settings.once = cli.once;
        settings.monitor = cli.monitor;

        settings.with_env_credentials()
    }
}

impl ConfigProvider for Settings {
    fn postcode(&self) -> &str {
        &self.postcode
    }

    fn radius_km(&self) -> f64 {
        self.radius_km
    }

    fn check_interval(&self) -> Duration {
        self.check_interval
    }

    fn query_bounds(&self, center: Coordinates) -> BoundingBox {
        match self.bounds {
            BoundsMode::Fixed(bounds) => bounds,
            BoundsMode::Auto => BoundingBox::around(center, self.radius_km),
        }
    }
}

fn validate_bounds(bounds: &BoundingBox) -> Result<()> {
    validation::validate_range("bounds.lamin", bounds.lamin, -90.0, 90.0)?;
    validation::validate_range("bounds.lamax", bounds.lamax, -90.0, 90.0)?;
    validation::validate_range("bounds.lomin", bounds.lomin, -180.0, 180.0)?;
    validation::validate_range("bounds.lomax", bounds.lomax, -180.0, 180.0)?;

    if bounds.lamin >= bounds.lamax || bounds.lomin >= bounds.lomax {
        return Err(AlertError::ConfigValidationError {
            field: "bounds".to_string(),
            message: "minimum must be below maximum".to_string(),
        });
    }
    Ok(())
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_postcode("postcode", &self.postcode)?;

        if !(self.radius_km > 0.0 && self.radius_km <= MAX_RADIUS_KM) {
            return Err(AlertError::InvalidConfigValueError {
                field: "radius".to_string(),
                value: self.radius_km.to_string(),
                reason: format!("Radius must be above 0 and at most {}km", MAX_RADIUS_KM),
            });
        }
        validation::validate_range(
            "interval",
            self.check_interval.as_secs(),
            MIN_CHECK_INTERVAL_SECS,
            MAX_CHECK_INTERVAL_SECS,
        )?;

        if let Some(path) = &self.favourites_file {
            validation::validate_path("favourites", &path.to_string_lossy())?;
        }
        if let BoundsMode::Fixed(bounds) = &self.bounds {
            validate_bounds(bounds)?;
        }

        validation::validate_url("endpoints.postcodes_url", &self.endpoints.postcodes_url)?;
        validation::validate_url("endpoints.opensky_url", &self.endpoints.opensky_url)?;
        validation::validate_url("endpoints.pushover_url", &self.endpoints.pushover_url)?;

        Ok(())
    }
}
