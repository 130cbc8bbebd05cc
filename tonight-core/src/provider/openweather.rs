use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::model::{Coordinates, HourlyForecast, HourlySample};

use super::ForecastProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/3.0";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// OpenWeather One Call client, trimmed down to the hourly temperature
/// series and the location's UTC offset.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build OpenWeather HTTP client")?;

        Ok(Self { api_key, base_url, http })
    }
}

#[derive(Debug, Deserialize)]
struct OwHour {
    dt: i64,
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwOneCallResponse {
    timezone_offset: i32,
    hourly: Vec<OwHour>,
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn hourly_forecast(&self, coords: &Coordinates) -> Result<HourlyForecast> {
        let url = format!("{}/onecall", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string().as_str()),
                ("lon", coords.longitude.to_string().as_str()),
                ("units", "metric"),
                ("exclude", "current,minutely,daily,alerts"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather (one call)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read OpenWeather response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwOneCallResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather one call JSON")?;

        if parsed.hourly.is_empty() {
            return Err(anyhow!("OpenWeather response contained no hourly data"));
        }

        tracing::debug!(
            hours = parsed.hourly.len(),
            offset = parsed.timezone_offset,
            "Fetched hourly forecast"
        );

        let samples = parsed
            .hourly
            .into_iter()
            .map(|h| HourlySample { timestamp: h.dt, temperature_c: h.temp })
            .collect();

        Ok(HourlyForecast { utc_offset_seconds: parsed.timezone_offset, samples })
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

    fn provider_for(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::with_base_url("KEY".to_string(), server.uri()).unwrap()
    }

    const LONDON: Coordinates = Coordinates { latitude: 51.5074, longitude: -0.1278 };

    #[tokio::test]
    async fn parses_hourly_series_and_offset() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/onecall"))
            .and(query_param("units", "metric"))
            .and(query_param("exclude", "current,minutely,daily,alerts"))
            .and(query_param("appid", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "timezone_offset": 3600,
                "hourly": [
                    { "dt": 1622588400_i64, "temp": 14.2, "humidity": 80 },
                    { "dt": 1622592000_i64, "temp": 13.7, "humidity": 82 }
                ]
            })))
            .mount(&server)
            .await;

        let forecast = provider_for(&server).hourly_forecast(&LONDON).await.unwrap();

        assert_eq!(forecast.utc_offset_seconds, 3600);
        assert_eq!(forecast.samples.len(), 2);
        assert_eq!(forecast.samples[0].timestamp, 1622588400);
        assert!((forecast.samples[1].temperature_c - 13.7).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_hourly_series_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/onecall"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "timezone_offset": 0,
                "hourly": []
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server).hourly_forecast(&LONDON).await.unwrap_err();

        assert!(err.to_string().contains("no hourly data"));
    }

    #[tokio::test]
    async fn non_success_status_surfaces_as_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/onecall"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = provider_for(&server).hourly_forecast(&LONDON).await.unwrap_err();

        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn truncate_body_cuts_at_a_char_boundary() {
        // A degree sign straddling the 200-byte limit must not panic the slice.
        let body = format!("{}\u{b0}C and more", "x".repeat(199));
        assert!(!body.is_char_boundary(200));

        let truncated = truncate_body(&body);

        assert_eq!(truncated, format!("{}...", "x".repeat(199)));
    }

    #[test]
    fn truncate_body_keeps_short_bodies_intact() {
        assert_eq!(truncate_body("not found"), "not found");
    }
}
