//! HireLink Mailer - Transactional OTP Email Dispatch
//!
//! This crate provides the outbound email path for the HireLink job portal:
//! rendering one-time-passcode verification messages and submitting them to
//! an SMTP relay through a bounded connection pool. Every dispatch attempt
//! is reported as a [`DispatchResult`] instead of an error.

pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod email;
pub mod error;

// Re-export commonly used types
pub use config::MailerConfig;
pub use dispatcher::OtpMailDispatcher;
pub use domain::{DispatchResult, OutgoingEmail};
pub use error::{MailerError, Result};
