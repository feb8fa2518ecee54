//! OTP mail dispatch service

use crate::config::MailerConfig;
use crate::domain::{DispatchResult, OutgoingEmail};
use crate::email::smtp::SmtpMailTransport;
use crate::email::templates::{EmailTemplate, OTP_VALIDITY_MINUTES, TemplateEngine};
use crate::email::transport::MailTransport;
use crate::error::Result;
use std::sync::Arc;
use tracing::{error, info};

/// Service that formats and dispatches one-time-passcode emails.
///
/// Holds a shared transport with its connection pool, so one dispatcher
/// instance serves concurrent callers.
pub struct OtpMailDispatcher {
    transport: Arc<dyn MailTransport>,
}

impl OtpMailDispatcher {
    /// Create a dispatcher backed by a pooled SMTP transport built from
    /// the given configuration.
    pub fn new(config: &MailerConfig) -> Result<Self> {
        let transport = SmtpMailTransport::from_config(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a dispatcher around an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Send a one-time-passcode email to `email`.
    ///
    /// Never returns an error: every transport failure is folded into a
    /// failure result carrying the underlying error text, and exactly one
    /// result is produced per call. Retry policy belongs to the caller.
    pub async fn send_otp_mail(&self, email: &str, otp: &str) -> DispatchResult {
        let mut engine = TemplateEngine::new();
        engine
            .set("otp", otp)
            .set("expiry_minutes", OTP_VALIDITY_MINUTES.to_string())
            .set("year", chrono::Utc::now().format("%Y").to_string());

        let rendered = engine.render_template(EmailTemplate::OtpVerification);
        let mail = OutgoingEmail::new(email, rendered.subject, rendered.html_body);

        // The passcode itself stays out of the logs.
        match self.transport.send(&mail).await {
            Ok(()) => {
                info!(to = %email, transport = self.transport.name(), "OTP email dispatched");
                DispatchResult::success()
            }
            Err(e) => {
                error!(to = %email, transport = self.transport.name(), error = %e, "OTP email dispatch failed");
                DispatchResult::failure(e.detail())
            }
        }
    }

    /// Verify relay connectivity and authentication without sending mail.
    pub async fn test_connection(&self) -> Result<()> {
        self.transport.test_connection().await?;
        Ok(())
    }
}
