use crate::adapters::{build_client, decode_json, endpoint_url};
use crate::domain::model::{Aircraft, BoundingBox};
use crate::domain::ports::AircraftSource;
use crate::utils::error::{AlertError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

pub const OPENSKY_URL: &str = "https://opensky-network.org/api";

#[derive(Debug, Deserialize)]
struct StatesResponse {
    #[serde(default)]
    time: Option<i64>,
    // OpenSky sends `"states": null` when the box is empty.
    #[serde(default)]
    states: Option<Vec<Vec<Value>>>,
}

#[derive(Debug, Clone, Default)]
pub struct OpenSkyCredentials {
    pub username: String,
    pub password: Option<String>,
}

/// Client for the OpenSky Network `/states/all` endpoint.
pub struct OpenSkyClient {
    client: Client,
    base_url: String,
    credentials: Option<OpenSkyCredentials>,
}

impl OpenSkyClient {
    pub fn new(base_url: impl Into<String>, credentials: Option<OpenSkyCredentials>) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.into(),
            credentials,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }
}

#[async_trait]
impl AircraftSource for OpenSkyClient {
    async fn fetch_aircraft(&self, bounds: &BoundingBox) -> Result<Vec<Aircraft>> {
        let url = endpoint_url(&self.base_url, &["states", "all"])?;
        tracing::debug!("Making API request to: {} with {:?}", url, bounds);

        let mut request = self.client.get(url).query(&[
            ("lamin", bounds.lamin),
            ("lamax", bounds.lamax),
            ("lomin", bounds.lomin),
            ("lomax", bounds.lomax),
        ]);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, credentials.password.as_ref());
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("OpenSky response status: {}", status);

        if !status.is_success() {
            return Err(AlertError::UpstreamStatus {
                service: "OpenSky".to_string(),
                status: status.as_u16(),
            });
        }

        let body: StatesResponse = decode_json("OpenSky", response).await?;
        let states = body.states.unwrap_or_default();
        let total = states.len();

        let aircraft: Vec<Aircraft> = states
            .iter()
            .filter_map(|state| {
                let parsed = Aircraft::from_state_vector(state);
                if parsed.is_none() {
                    tracing::debug!("Skipping malformed state vector: {:?}", state);
                }
                parsed
            })
            .collect();

        tracing::debug!(
            "OpenSky snapshot at {:?}: {} state vectors, {} usable",
            body.time,
            total,
            aircraft.len()
        );
        Ok(aircraft)
    }
}
