//! Email template system
//!
//! Provides simple variable substitution for email templates.
//! Variables are specified using {{variable_name}} syntax. Substitution is
//! a single pass over the template text: values are HTML-escaped and never
//! re-scanned for further placeholders.

use std::collections::HashMap;

/// Minutes an issued OTP stays valid. Stated in the message copy only;
/// expiry enforcement lives with the verification flow.
pub const OTP_VALIDITY_MINUTES: u32 = 5;

/// Available email templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    /// One-time-passcode verification email
    OtpVerification,
}

impl EmailTemplate {
    /// Get the subject line for this template
    pub fn subject(&self) -> &'static str {
        match self {
            Self::OtpVerification => "Your OTP Verification Code",
        }
    }

    /// Get the HTML body template
    pub fn html_body(&self) -> &'static str {
        match self {
            Self::OtpVerification => OTP_VERIFICATION_TEMPLATE,
        }
    }
}

/// Template rendering engine with variable substitution
#[derive(Debug, Default)]
pub struct TemplateEngine {
    variables: HashMap<String, String>,
}

impl TemplateEngine {
    /// Create a new template engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Render a template string, replacing each {{variable}} occurrence with
    /// its escaped value. Substituted values are never re-scanned; unknown
    /// or unterminated placeholders are left as-is.
    pub fn render(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            let (head, tail) = rest.split_at(start);
            result.push_str(head);

            match tail[2..].find("}}") {
                Some(end) => {
                    let key = &tail[2..2 + end];
                    match self.variables.get(key) {
                        Some(value) => result.push_str(&escape_html(value)),
                        None => result.push_str(&tail[..end + 4]),
                    }
                    rest = &tail[end + 4..];
                }
                None => {
                    result.push_str(tail);
                    rest = "";
                }
            }
        }
        result.push_str(rest);

        result
    }

    /// Render a complete email template
    pub fn render_template(&self, template: EmailTemplate) -> RenderedEmail {
        RenderedEmail {
            subject: self.render(template.subject()),
            html_body: self.render(template.html_body()),
        }
    }
}

/// Rendered email with all variables substituted
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html_body: String,
}

/// Escape the HTML metacharacters of a substituted value.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ============================================================================
// Email Templates
// ============================================================================

const OTP_VERIFICATION_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>OTP Verification</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background-color: #f5f5f5; }
        .container { max-width: 600px; margin: 40px auto; padding: 40px; background: #ffffff; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; }
        .header h1 { color: #2563eb; margin: 0; font-size: 24px; }
        .content { margin-bottom: 30px; }
        .otp-code { text-align: center; font-size: 32px; letter-spacing: 8px; color: #2563eb; background-color: #eff6ff; padding: 16px 0; border-radius: 6px; margin: 30px 0; }
        .footer { text-align: center; font-size: 12px; color: #666; margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Verify Your Email</h1>
        </div>
        <div class="content">
            <p>Hi there,</p>
            <p>Use the code below to verify your email address for your HireLink account:</p>
            <h2 class="otp-code">{{otp}}</h2>
            <p style="font-size: 14px; color: #666;">
                This code will expire in {{expiry_minutes}} minutes.
            </p>
        </div>
        <div class="footer">
            <p>If you didn't request this code, you can safely ignore this email.</p>
            <p>&copy; {{year}} HireLink</p>
        </div>
    </div>
</body>
</html>"#;
