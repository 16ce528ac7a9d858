use crate::adapters::{build_client, decode_json, endpoint_url};
use crate::domain::model::Coordinates;
use crate::domain::ports::Geocoder;
use crate::utils::error::{AlertError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

pub const POSTCODES_IO_URL: &str = "https://api.postcodes.io";

#[derive(Debug, Deserialize)]
struct PostcodeResponse {
    status: u16,
    #[serde(default)]
    result: Option<PostcodeResult>,
}

#[derive(Debug, Deserialize)]
struct PostcodeResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// UK postcode lookup via postcodes.io.
pub struct PostcodesIoGeocoder {
    client: Client,
    base_url: String,
}

impl PostcodesIoGeocoder {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl Geocoder for PostcodesIoGeocoder {
    async fn locate(&self, postcode: &str) -> Result<Coordinates> {
        let url = endpoint_url(&self.base_url, &["postcodes", postcode.trim()])?;
        tracing::debug!("Looking up postcode at: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Postcode API response status: {}", status);

        // postcodes.io answers unknown postcodes with 404 and a JSON body.
        if status == StatusCode::NOT_FOUND {
            return Err(AlertError::PostcodeNotFound {
                postcode: postcode.to_string(),
            });
        }
        if !status.is_success() {
            return Err(AlertError::UpstreamStatus {
                service: "postcodes.io".to_string(),
                status: status.as_u16(),
            });
        }

        let body: PostcodeResponse = decode_json("postcodes.io", response).await?;
        match body {
            PostcodeResponse {
                status: 200,
                result:
                    Some(PostcodeResult {
                        latitude: Some(lat),
                        longitude: Some(lon),
                    }),
            } => Ok(Coordinates { lat, lon }),
            // Terminated postcodes resolve but carry no coordinates.
            _ => Err(AlertError::PostcodeNotFound {
                postcode: postcode.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_locate_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/postcodes/SW1A1AA");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "status": 200,
                    "result": {"postcode": "SW1A 1AA", "longitude": -0.141588, "latitude": 51.501009}
                }));
        });

        let geocoder = PostcodesIoGeocoder::new(server.base_url()).unwrap();
        let coords = geocoder.locate("SW1A1AA").await.unwrap();

        api_mock.assert();
        assert_eq!(coords, Coordinates { lat: 51.501009, lon: -0.141588 });
    }

    #[tokio::test]
    async fn test_locate_unknown_postcode() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/postcodes/ZZ999ZZ");
            then.status(404)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"status": 404, "error": "Invalid postcode"}));
        });

        let geocoder = PostcodesIoGeocoder::new(server.base_url()).unwrap();
        let err = geocoder.locate("ZZ999ZZ").await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, AlertError::PostcodeNotFound { .. }));
    }

    #[tokio::test]
    async fn test_locate_without_coordinates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/postcodes/AB10AA");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "status": 200,
                    "result": {"postcode": "AB1 0AA", "longitude": null, "latitude": null}
                }));
        });

        let geocoder = PostcodesIoGeocoder::new(server.base_url()).unwrap();
        let err = geocoder.locate("AB10AA").await.unwrap_err();
        assert!(matches!(err, AlertError::PostcodeNotFound { .. }));
    }

    #[tokio::test]
    async fn test_locate_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/postcodes/M11AE");
            then.status(503);
        });

        let geocoder = PostcodesIoGeocoder::new(server.base_url()).unwrap();
        let err = geocoder.locate("M11AE").await.unwrap_err();
        assert!(matches!(err, AlertError::UpstreamStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_locate_garbage_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/postcodes/M11AE");
            then.status(200).body("not json");
        });

        let geocoder = PostcodesIoGeocoder::new(server.base_url()).unwrap();
        let err = geocoder.locate("M11AE").await.unwrap_err();
        assert!(matches!(err, AlertError::MalformedResponse { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
