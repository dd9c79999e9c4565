use thiserror::Error;

/// Why a fetch cycle did not update the dashboard.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No usable API key; detected before any request is made.
    #[error("no OpenWeather API key configured")]
    MissingCredential,

    /// Either request failed: network error, non-2xx status or undecodable body.
    #[error("weather request failed: {error:#}")]
    Transport {
        error: anyhow::Error,
        /// Round trip of the cycle, when both requests got an HTTP response back.
        latency_ms: Option<u64>,
    },
}

impl FetchError {
    pub fn transport(error: anyhow::Error, latency_ms: Option<u64>) -> Self {
        FetchError::Transport { error, latency_ms }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, FetchError::MissingCredential)
    }

    pub fn latency_ms(&self) -> Option<u64> {
        match self {
            FetchError::Transport { latency_ms, .. } => *latency_ms,
            FetchError::MissingCredential => None,
        }
    }
}

/// Context attached to a request that never produced an HTTP response.
#[derive(Debug, Error)]
#[error("Failed to send request to {target}")]
pub struct RequestNotSent {
    pub target: String,
}

/// True when `err` carries [`RequestNotSent`] anywhere in its chain.
pub fn is_request_not_sent(err: &anyhow::Error) -> bool {
    err.downcast_ref::<RequestNotSent>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_message_includes_context_chain() {
        let err = FetchError::transport(
            anyhow::anyhow!("status 404 Not Found").context("current weather request failed"),
            Some(12),
        );

        let msg = err.to_string();
        assert!(msg.contains("current weather request failed"));
        assert!(msg.contains("404"));
        assert!(!err.is_configuration());
        assert_eq!(err.latency_ms(), Some(12));
    }

    #[test]
    fn request_not_sent_is_found_under_more_context() {
        let err = anyhow::anyhow!("connection refused")
            .context(RequestNotSent { target: "OpenWeather (forecast)".into() })
            .context("forecast request failed");

        assert!(is_request_not_sent(&err));
        assert!(!is_request_not_sent(&anyhow::anyhow!("status 404 Not Found")));
    }
}
