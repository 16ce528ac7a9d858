// Adapters layer: concrete implementations of the domain ports (geocoding, aircraft feed, notifications).

pub mod opensky;
pub mod postcodes;
pub mod pushover;

pub use opensky::{OpenSkyClient, OpenSkyCredentials};
pub use postcodes::PostcodesIoGeocoder;
pub use pushover::{LogNotifier, PushoverCredentials, PushoverNotifier};

use crate::utils::error::{AlertError, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn build_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

/// Append path segments to `base`, percent-encoding each one.
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url> {
    let invalid = |reason: String| AlertError::InvalidConfigValueError {
        field: "endpoint".to_string(),
        value: base.to_string(),
        reason,
    };

    let mut url = Url::parse(base).map_err(|e| invalid(format!("Invalid URL format: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Decode a JSON body, reporting anything unparseable as a malformed `service` response.
pub(crate) async fn decode_json<T: DeserializeOwned>(service: &str, response: Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| AlertError::MalformedResponse {
        service: service.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_and_escapes() {
        let url = endpoint_url("https://api.postcodes.io", &["postcodes", "SW1A 1AA"]).unwrap();
        assert_eq!(url.as_str(), "https://api.postcodes.io/postcodes/SW1A%201AA");

        let url = endpoint_url("https://opensky-network.org/api/", &["states", "all"]).unwrap();
        assert_eq!(url.as_str(), "https://opensky-network.org/api/states/all");
    }

    #[test]
    fn test_endpoint_url_rejects_garbage() {
        assert!(endpoint_url("not a url", &["x"]).is_err());
        assert!(endpoint_url("mailto:someone@example.com", &["x"]).is_err());
    }
}
