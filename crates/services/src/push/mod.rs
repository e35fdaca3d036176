use async_trait::async_trait;
use thiserror::Error;

pub mod fcm;

pub use fcm::FcmTransport;

/// Rendered push payload: fixed title, computed body, deep link and icon.
#[derive(Debug, Clone)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    pub link: String,
    pub icon: String,
}

/// Per-token result of one multicast attempt. `error: None` means the
/// transport accepted the message; it says nothing about an offline device
/// ever showing it.
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub token: String,
    pub error: Option<DeliveryFailure>,
}

impl DeliveryOutcome {
    pub fn accepted(&self) -> bool {
        self.error.is_none()
    }

    /// True for the failure kinds that mean the registration is dead and
    /// should be deregistered. Transient failures stay registered.
    pub fn is_permanent_failure(&self) -> bool {
        matches!(
            self.error,
            Some(DeliveryFailure::InvalidToken) | Some(DeliveryFailure::NotRegistered)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailure {
    /// The transport rejected the token value itself.
    InvalidToken,
    /// The token was valid once but the app instance is gone.
    NotRegistered,
    /// Anything transient: throttling, server errors, network.
    Other,
}

#[derive(Debug, Error)]
pub enum PushError {
    #[error("Push credentials unreadable: {0}")]
    Credentials(#[from] std::io::Error),
    #[error("Push credentials malformed: {0}")]
    Key(#[from] serde_json::Error),
    #[error("Assertion signing failed: {0}")]
    Assertion(#[from] jsonwebtoken::errors::Error),
    #[error("Token exchange rejected: HTTP {0}")]
    Auth(u16),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Multicast seam of the pipeline. One call addresses every token of a
/// recipient; the returned outcomes are aligned 1:1 with the input order.
/// Never invoked with an empty token list.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn send_to_tokens(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> Result<Vec<DeliveryOutcome>, PushError>;
}
