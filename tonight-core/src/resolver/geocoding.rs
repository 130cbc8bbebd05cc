use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::model::{Coordinates, ResolvedLocation};

use super::{CoordinateResolver, ResolveError};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Remote resolver backed by the OpenWeather direct geocoding API.
#[derive(Debug, Clone)]
pub struct GeocodingResolver {
    api_key: String,
    base_url: String,
    http: Client,
}

impl GeocodingResolver {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build geocoding HTTP client")?;

        Ok(Self { api_key, base_url, http })
    }
}

#[derive(Debug, Deserialize)]
struct GeoEntry {
    name: String,
    lat: f64,
    lon: f64,
}

#[async_trait]
impl CoordinateResolver for GeocodingResolver {
    async fn resolve(&self, city: &str) -> Result<ResolvedLocation, ResolveError> {
        let url = format!("{}/direct", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("limit", "1"), ("appid", self.api_key.as_str())])
            .send()
            .await
            .context("Failed to send request to the geocoding API")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read geocoding response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            )
            .into());
        }

        let parsed: Vec<GeoEntry> =
            serde_json::from_str(&body).context("Failed to parse geocoding JSON")?;

        let entry = match parsed.into_iter().next() {
            Some(entry) => entry,
            None => return Err(ResolveError::NotFound { city: city.to_string() }),
        };

        tracing::debug!(city = %entry.name, lat = entry.lat, lon = entry.lon, "Geocoded");

        Ok(ResolvedLocation {
            name: entry.name,
            coordinates: Coordinates { latitude: entry.lat, longitude: entry.lon },
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Back off to a char boundary so multi-byte UTF-8 doesn't panic the slice.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver_for(server: &MockServer) -> GeocodingResolver {
        GeocodingResolver::with_base_url("KEY".to_string(), server.uri()).unwrap()
    }

    #[tokio::test]
    async fn resolves_the_first_result() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/direct"))
            .and(query_param("q", "London"))
            .and(query_param("limit", "1"))
            .and(query_param("appid", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "name": "London", "lat": 51.5074, "lon": -0.1278, "country": "GB" }
            ])))
            .mount(&server)
            .await;

        let location = resolver_for(&server).resolve("London").await.unwrap();

        assert_eq!(location.name, "London");
        assert!((location.coordinates.longitude - (-0.1278)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_result_list_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let err = resolver_for(&server).resolve("Atlantis").await.unwrap_err();

        assert!(matches!(err, ResolveError::NotFound { .. }));
    }

    #[tokio::test]
    async fn non_success_status_surfaces_as_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/direct"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"cod":401}"#))
            .mount(&server)
            .await;

        let err = resolver_for(&server).resolve("London").await.unwrap_err();

        assert!(!matches!(err, ResolveError::NotFound { .. }));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn truncate_body_cuts_at_a_char_boundary() {
        // A degree sign straddling the 200-byte limit must not panic the slice.
        let body = format!("{}\u{b0}C and more", "x".repeat(199));
        assert!(!body.is_char_boundary(200));

        let truncated = truncate_body(&body);

        assert_eq!(truncated, format!("{}...", "x".repeat(199)));
    }
}
