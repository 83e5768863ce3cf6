use serde::Deserialize;

use crate::models::{PlaceFilters, RecommendationBatch};

/// Failure modes of one transport call, tagged so consumers match on the
/// variant instead of inspecting runtime types.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("server returned status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

/// Error envelope returned by the API on failure
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin RPC seam between the search controller and the backend.
///
/// The controller only ever sees this trait, so tests drive the state
/// machine with a scripted double.
#[async_trait::async_trait]
pub trait RecommendationTransport: Send + Sync {
    async fn fetch_recommendations(
        &self,
        filters: &PlaceFilters,
    ) -> Result<RecommendationBatch, TransportError>;
}

/// HTTP implementation posting to the recommendations endpoint
pub struct HttpTransport {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// `endpoint` is the full URL of the recommendations route
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait::async_trait]
impl RecommendationTransport for HttpTransport {
    async fn fetch_recommendations(
        &self,
        filters: &PlaceFilters,
    ) -> Result<RecommendationBatch, TransportError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(filters)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(TransportError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<RecommendationBatch>()
            .await
            .map_err(|e| TransportError::InvalidBody(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_messages_carry_context() {
        let err = TransportError::Http {
            status: 500,
            message: "Malformed AI response: x".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("Malformed AI response"));
    }
}
