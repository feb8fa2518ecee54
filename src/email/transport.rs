//! Mail transport trait and error types

use crate::domain::OutgoingEmail;
use async_trait::async_trait;
use thiserror::Error;

/// Mail transport error types
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Send rejected: {0}")]
    Rejected(String),

    #[error("Invalid message: {0}")]
    Message(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl TransportError {
    /// Underlying error text without the kind prefix. Dispatch results carry
    /// this form; the prefixed `Display` form is for logs.
    pub fn detail(&self) -> &str {
        match self {
            Self::Connection(msg)
            | Self::Authentication(msg)
            | Self::Rejected(msg)
            | Self::Message(msg)
            | Self::Configuration(msg) => msg,
        }
    }
}

/// Trait for mail transports
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Submit one message to the transport
    async fn send(&self, mail: &OutgoingEmail) -> Result<(), TransportError>;

    /// Verify connectivity and authentication without sending mail
    async fn test_connection(&self) -> Result<(), TransportError>;

    /// Get the transport name
    fn name(&self) -> &'static str;
}
