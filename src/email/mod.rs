//! Email delivery for the HireLink mailer
//!
//! This module provides the transport seam and its SMTP implementation
//! (using lettre), plus the transactional message templates.

pub mod smtp;
pub mod templates;
pub mod transport;

pub use smtp::SmtpMailTransport;
pub use templates::{EmailTemplate, TemplateEngine};
pub use transport::{MailTransport, TransportError};
