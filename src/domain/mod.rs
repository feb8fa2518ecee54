//! Domain types for outgoing mail and dispatch outcomes

use serde::Serialize;

/// Confirmation text carried by successful dispatch results.
pub const OTP_SENT_MESSAGE: &str = "OTP sent successfully";

/// Email message handed to a mail transport.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html_body: String,
    /// Optional plain-text alternative
    pub text_body: Option<String>,
}

impl OutgoingEmail {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html_body: html_body.into(),
            text_body: None,
        }
    }

    pub fn with_text_body(mut self, text_body: impl Into<String>) -> Self {
        self.text_body = Some(text_body.into());
        self
    }
}

/// Outcome of a single dispatch attempt.
///
/// Exactly one of `message` and `error` is populated; absent fields are
/// omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    /// Successful dispatch with the standard confirmation text.
    pub fn success() -> Self {
        Self {
            success: true,
            message: Some(OTP_SENT_MESSAGE.to_string()),
            error: None,
        }
    }

    /// Failed dispatch carrying the underlying error text.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}
