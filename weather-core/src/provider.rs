use crate::{Config, ForecastSnapshot, WeatherSnapshot, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// A source of current conditions and 5-day forecasts for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Label shown as the endpoint in the connectivity panel.
    fn name(&self) -> &'static str;

    async fn current_conditions(&self, city: &str) -> anyhow::Result<WeatherSnapshot>;

    /// 3-hour steps over a 5-day horizon.
    async fn forecast(&self, city: &str) -> anyhow::Result<ForecastSnapshot>;
}

/// Construct the OpenWeather provider from config.
///
/// Returns `None` when no usable API key is configured.
pub fn provider_from_config(config: &Config) -> Option<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    let provider = OpenWeatherProvider::new(api_key.to_owned()).with_base_url(&config.base_url);
    Some(Arc::new(provider))
}
