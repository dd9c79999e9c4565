//! The dashboard driver: owns the state, launches fetch cycles and applies their outcomes.
//!
//! Cycles run as spawned tasks and report back over a channel, so the state is only
//! ever mutated by whoever drives the dashboard loop.

use std::sync::Arc;

use anyhow::anyhow;
use tokio::{sync::mpsc, task::JoinError};

use crate::{
    Config,
    error::FetchError,
    notify::{Notification, Notifier},
    orchestrator::{FetchOrchestrator, FetchOutcome},
    state::{DashboardState, FetchTicket, Settlement},
};

#[derive(Debug)]
pub struct Dashboard {
    state: DashboardState,
    orchestrator: Arc<FetchOrchestrator>,
    notifier: Arc<dyn Notifier>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl Dashboard {
    pub fn new(config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        let orchestrator = FetchOrchestrator::from_config(config);
        let state = DashboardState::new(config.default_city.clone(), config.stale_results);
        Self::with_parts(state, orchestrator, notifier)
    }

    pub fn with_parts(
        state: DashboardState,
        orchestrator: FetchOrchestrator,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state,
            orchestrator: Arc::new(orchestrator),
            notifier,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn endpoint(&self) -> Option<&'static str> {
        self.orchestrator.endpoint()
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.state.update_draft(text);
    }

    /// Commit the draft; a non-blank draft becomes the city and starts a fetch cycle.
    pub fn commit(&mut self) -> Option<FetchTicket> {
        let city = self.state.commit()?.to_string();
        self.fetch_weather_data(&city)
    }

    /// Fetch data for the committed city, as done once at start-up.
    pub fn fetch_current_city(&mut self) -> Option<FetchTicket> {
        let city = self.state.city().to_string();
        self.fetch_weather_data(&city)
    }

    /// Start a fetch cycle for `city` in the background.
    ///
    /// Without a usable API key no request is made, a configuration notification is
    /// raised and `None` is returned.
    ///
    /// Must be called from within a tokio runtime.
    pub fn fetch_weather_data(&mut self, city: &str) -> Option<FetchTicket> {
        if !self.orchestrator.is_configured() {
            tracing::warn!(city, "no API key configured, skipping fetch");
            self.notifier.notify(&Notification::missing_credential());
            return None;
        }

        let ticket = self.state.begin_fetch(city);
        tracing::debug!(seq = ticket.seq, city, "starting fetch cycle");

        let orchestrator = Arc::clone(&self.orchestrator);
        let tx = self.outcome_tx.clone();
        let task_ticket = ticket.clone();
        tokio::spawn(async move {
            let cycle = tokio::spawn({
                let ticket = task_ticket.clone();
                async move { orchestrator.run(ticket).await }
            });
            // Every ticket gets an outcome, even when the cycle task dies.
            let outcome = cycle.await.unwrap_or_else(|join_err| failed_task(task_ticket, join_err));
            // The receiver lives as long as the dashboard; a send error means it is gone.
            let _ = tx.send(outcome);
        });

        Some(ticket)
    }

    /// Wait for the next fetch cycle to settle. Returns `None` if nothing is in flight.
    pub async fn next_outcome(&mut self) -> Option<FetchOutcome> {
        if !self.state.is_loading() {
            return None;
        }
        self.outcome_rx.recv().await
    }

    /// Apply a settled cycle to the state and raise a notification if it failed.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Settlement {
        let FetchOutcome { ticket, result } = outcome;

        match result {
            Ok(data) => {
                let settlement = self.state.resolve(&ticket, data);
                tracing::debug!(seq = ticket.seq, ?settlement, "fetch cycle resolved");
                settlement
            }
            Err(FetchError::MissingCredential) => {
                self.state.abandon(&ticket);
                self.notifier.notify(&Notification::missing_credential());
                Settlement::Discarded
            }
            Err(err) => {
                let settlement = self.state.reject(&ticket, err.latency_ms());
                if settlement == Settlement::Applied {
                    tracing::warn!(seq = ticket.seq, city = %ticket.city, error = %err, "fetch cycle failed");
                    self.notifier.notify(&Notification::from(&err));
                }
                settlement
            }
        }
    }

    /// Run one fetch cycle for `city` to completion.
    pub async fn refresh(&mut self, city: &str) -> Option<Settlement> {
        self.fetch_weather_data(city)?;
        self.settle_all().await
    }

    /// Apply outcomes until no cycle is in flight. Returns the last settlement.
    pub async fn settle_all(&mut self) -> Option<Settlement> {
        let mut last = None;
        while let Some(outcome) = self.next_outcome().await {
            last = Some(self.apply(outcome));
        }
        last
    }
}

fn failed_task(ticket: FetchTicket, join_err: JoinError) -> FetchOutcome {
    tracing::error!(seq = ticket.seq, city = %ticket.city, error = %join_err, "fetch cycle task failed");
    FetchOutcome {
        ticket,
        result: Err(FetchError::transport(anyhow!("fetch task failed: {join_err}"), None)),
    }
}
