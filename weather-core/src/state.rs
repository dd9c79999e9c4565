//! Dashboard state container and its transitions.

use crate::{
    config::StaleResultPolicy,
    model::{Connectivity, DailySummary, ForecastSnapshot, WeatherSnapshot},
};

/// Identifies one fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub city: String,
}

/// Both payloads of a successful fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedData {
    pub weather: WeatherSnapshot,
    pub forecast: ForecastSnapshot,
    pub latency_ms: u64,
}

/// Whether a settled cycle was allowed to change the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    Discarded,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    draft: String,
    city: String,
    weather: Option<WeatherSnapshot>,
    forecast: Option<ForecastSnapshot>,
    connectivity: Connectivity,
    last_issued: u64,
    in_flight: usize,
    policy: StaleResultPolicy,
}

impl DashboardState {
    pub fn new(city: impl Into<String>, policy: StaleResultPolicy) -> Self {
        Self {
            draft: String::new(),
            city: city.into(),
            weather: None,
            forecast: None,
            connectivity: Connectivity::default(),
            last_issued: 0,
            in_flight: 0,
            policy,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn forecast(&self) -> Option<&ForecastSnapshot> {
        self.forecast.as_ref()
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Daily summaries of the current forecast snapshot, in the local time zone.
    pub fn daily_forecast(&self) -> Vec<DailySummary> {
        self.forecast
            .as_ref()
            .map(|f| crate::forecast::daily_summaries(&f.list))
            .unwrap_or_default()
    }

    /// Store the raw input text.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Commit the trimmed draft as the current city.
    ///
    /// Returns the committed city, or `None` when the draft is blank and nothing changed.
    pub fn commit(&mut self) -> Option<&str> {
        let trimmed = self.draft.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.city = trimmed.to_string();
        Some(self.city.as_str())
    }

    /// Start a fetch cycle for `city`.
    pub fn begin_fetch(&mut self, city: &str) -> FetchTicket {
        self.last_issued += 1;
        self.in_flight += 1;
        FetchTicket { seq: self.last_issued, city: city.to_string() }
    }

    /// Settle a cycle successfully: replace both snapshots and mark the API connected.
    pub fn resolve(&mut self, ticket: &FetchTicket, data: FetchedData) -> Settlement {
        if self.settle(ticket) == Settlement::Discarded {
            return Settlement::Discarded;
        }
        self.weather = Some(data.weather);
        self.forecast = Some(data.forecast);
        self.connectivity = Connectivity { connected: true, latency_ms: data.latency_ms };
        Settlement::Applied
    }

    /// Settle a cycle as failed: keep the snapshots and mark the API disconnected.
    ///
    /// `latency_ms` is the cycle's round trip when both responses came back, e.g. a 404;
    /// `None` keeps the last measured value.
    pub fn reject(&mut self, ticket: &FetchTicket, latency_ms: Option<u64>) -> Settlement {
        if self.settle(ticket) == Settlement::Discarded {
            return Settlement::Discarded;
        }
        self.connectivity.connected = false;
        if let Some(latency_ms) = latency_ms {
            self.connectivity.latency_ms = latency_ms;
        }
        Settlement::Applied
    }

    /// Settle a cycle that never reached the network; only the loading flag changes.
    pub fn abandon(&mut self, ticket: &FetchTicket) {
        self.settle(ticket);
    }

    fn settle(&mut self, ticket: &FetchTicket) -> Settlement {
        self.in_flight = self.in_flight.saturating_sub(1);

        let stale = ticket.seq < self.last_issued;
        if stale && self.policy == StaleResultPolicy::Discard {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.last_issued,
                city = %ticket.city,
                "discarding result of superseded fetch cycle"
            );
            return Settlement::Discarded;
        }
        Settlement::Applied
    }
}
