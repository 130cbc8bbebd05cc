use crate::{
    Config,
    model::{Coordinates, HourlyForecast},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Fetches the hourly temperature series for a pair of coordinates.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn hourly_forecast(&self, coords: &Coordinates) -> anyhow::Result<HourlyForecast>;
}

/// Construct the forecast provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let api_key = config.weather_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No weather API key configured.\n\
             Hint: run `tonight configure` and enter your API key, or set \
             TONIGHT_WEATHER_API_KEY."
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::new(api_key.to_owned())?))
}
