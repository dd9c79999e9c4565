use std::{sync::Arc, time::Instant};

use anyhow::Context;

use crate::{
    Config,
    error::{FetchError, is_request_not_sent},
    provider::{WeatherProvider, provider_from_config},
    state::{FetchTicket, FetchedData},
};

/// Result of one fetch cycle, tagged with the ticket it was issued for.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<FetchedData, FetchError>,
}

/// Runs fetch cycles: both endpoints at once, success only if both succeed.
#[derive(Debug, Clone)]
pub struct FetchOrchestrator {
    provider: Option<Arc<dyn WeatherProvider>>,
}

impl FetchOrchestrator {
    pub fn from_config(config: &Config) -> Self {
        Self { provider: provider_from_config(config) }
    }

    pub fn with_provider(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider: Some(provider) }
    }

    /// An orchestrator without credentials; every cycle fails with `MissingCredential`.
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Endpoint label of the active provider.
    pub fn endpoint(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    pub async fn run(&self, ticket: FetchTicket) -> FetchOutcome {
        let result = self.fetch(&ticket.city).await;
        FetchOutcome { ticket, result }
    }

    async fn fetch(&self, city: &str) -> Result<FetchedData, FetchError> {
        let provider = self.provider.as_ref().ok_or(FetchError::MissingCredential)?;

        tracing::info!(city, "fetching current conditions and forecast");
        let started = Instant::now();

        let (weather, forecast) = tokio::join!(provider.current_conditions(city), provider.forecast(city));
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        // A round trip only counts when both requests got a response back.
        let unsent = [weather.as_ref().err(), forecast.as_ref().err()]
            .into_iter()
            .flatten()
            .any(is_request_not_sent);
        let measured = (!unsent).then_some(latency_ms);

        let weather = weather
            .context("current weather request failed")
            .map_err(|e| FetchError::transport(e, measured))?;
        let forecast = forecast
            .context("forecast request failed")
            .map_err(|e| FetchError::transport(e, measured))?;

        tracing::info!(city, latency_ms, steps = forecast.list.len(), "fetch cycle succeeded");
        Ok(FetchedData { weather, forecast, latency_ms })
    }
}
