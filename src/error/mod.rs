//! Unified error handling for the mailer

use crate::email::transport::TransportError;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, MailerError>;

/// Mailer error types
#[derive(Error, Debug)]
pub enum MailerError {
    /// Environment or value-level configuration problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure raised by the underlying mail transport
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<validator::ValidationErrors> for MailerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        MailerError::Config(errors.to_string())
    }
}
