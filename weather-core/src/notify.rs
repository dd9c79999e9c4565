//! User-visible notifications raised by fetch cycles.

use std::fmt::Debug;

use serde::Serialize;

use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationKind {
    /// The API key is missing or still the placeholder.
    Configuration,
    /// A fetch cycle failed.
    Connectivity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn missing_credential() -> Self {
        Self {
            kind: NotificationKind::Configuration,
            title: "API Key Required".to_string(),
            description: format!(
                "Please add your OpenWeatherMap API key: run `weather configure` or set {}.",
                crate::config::API_KEY_ENV
            ),
        }
    }

    pub fn connectivity_error() -> Self {
        Self {
            kind: NotificationKind::Connectivity,
            title: "Cloud Connectivity Error".to_string(),
            description: "Failed to fetch weather data. Please check the city name or API connection."
                .to_string(),
        }
    }
}

impl From<&FetchError> for Notification {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::MissingCredential => Notification::missing_credential(),
            FetchError::Transport { .. } => Notification::connectivity_error(),
        }
    }
}

/// Sink for user-visible notifications (toasts, stderr lines, ...).
pub trait Notifier: Send + Sync + Debug {
    fn notify(&self, notification: &Notification);
}
