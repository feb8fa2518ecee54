//! Mailer configuration loaded from environment variables

use crate::error::{MailerError, Result};
use std::time::Duration;
use validator::{Validate, ValidateEmail};

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FROM_EMAIL: &str = "no-reply@hirelink.dev";
pub const DEFAULT_FROM_NAME: &str = "HireLink";

/// SMTP relay settings and sender identity, resolved once at startup.
#[derive(Debug, Clone, Validate)]
pub struct MailerConfig {
    /// SMTP relay host
    pub host: String,
    /// SMTP relay port (587 for STARTTLS submission, 465 for implicit TLS)
    pub port: u16,
    /// Implicit TLS from the first byte when true; otherwise a plain
    /// connection that upgrades via STARTTLS when the relay offers it
    pub secure: bool,
    /// AUTH username; submission runs unauthenticated when this or the
    /// password is absent
    pub username: Option<String>,
    /// AUTH password
    pub password: Option<String>,
    /// Sender address on outgoing mail
    #[validate(email)]
    pub from_email: String,
    /// Sender display name; empty for a bare address
    pub from_name: String,
    /// Accept invalid or self-signed relay certificates. Needed on some
    /// shared hosts; keep off everywhere else
    pub accept_invalid_certs: bool,
    /// Per-connection I/O timeout in seconds
    pub timeout_secs: u64,
}

impl MailerConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// `SMTP_USER`/`SMTP_PASS` take precedence over the legacy
    /// `EMAIL_USER`/`EMAIL_PASS` names. The sender address falls back to
    /// `SMTP_FROM`, then the resolved username when it is itself an email
    /// address, then a fixed default.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let username = get("SMTP_USER").or_else(|| get("EMAIL_USER"));
        let password = get("SMTP_PASS").or_else(|| get("EMAIL_PASS"));

        let port = match get("SMTP_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| MailerError::Config(format!("invalid SMTP_PORT `{raw}`: {e}")))?,
            None => DEFAULT_SMTP_PORT,
        };

        let timeout_secs = match get("SMTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|e| {
                MailerError::Config(format!("invalid SMTP_TIMEOUT_SECS `{raw}`: {e}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        // Usernames like SendGrid's literal `apikey` are valid AUTH logins
        // but not sender addresses; those fall through to the default.
        let from_email = get("SMTP_FROM")
            .or_else(|| username.clone().filter(|u| u.validate_email()))
            .unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string());

        let config = Self {
            host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port,
            secure: parse_flag(get("SMTP_SECURE").as_deref()),
            username,
            password,
            from_email,
            from_name: get("SMTP_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            accept_invalid_certs: parse_flag(get("SMTP_ACCEPT_INVALID_CERTS").as_deref()),
            timeout_secs,
        };
        config.validate()?;

        Ok(config)
    }

    /// Per-connection I/O timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True when both AUTH credentials resolved.
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

/// The literal `true` in any letter case enables the flag; every other
/// value, including absence, disables it.
fn parse_flag(value: Option<&str>) -> bool {
    value.map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("True", true)]
    #[case("false", false)]
    #[case("1", false)]
    #[case("yes", false)]
    #[case("", false)]
    fn test_parse_flag(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(parse_flag(Some(raw)), expected);
    }

    #[test]
    fn test_parse_flag_absent_is_false() {
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = MailerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "smtp.gmail.com");
        assert_eq!(config.port, 587);
        assert!(!config.secure);
        assert!(config.username.is_none());
        assert!(config.password.is_none());
        assert!(!config.has_credentials());
        assert_eq!(config.from_email, "no-reply@hirelink.dev");
        assert_eq!(config.from_name, "HireLink");
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_primary_credential_names_win() {
        let config = MailerConfig::from_lookup(lookup(&[
            ("SMTP_USER", "portal@hirelink.dev"),
            ("EMAIL_USER", "legacy@hirelink.dev"),
            ("SMTP_PASS", "primary"),
            ("EMAIL_PASS", "legacy"),
        ]))
        .unwrap();
        assert_eq!(config.username.as_deref(), Some("portal@hirelink.dev"));
        assert_eq!(config.password.as_deref(), Some("primary"));
    }

    #[test]
    fn test_legacy_credential_names_fall_back() {
        let config = MailerConfig::from_lookup(lookup(&[
            ("EMAIL_USER", "legacy@hirelink.dev"),
            ("EMAIL_PASS", "legacy"),
        ]))
        .unwrap();
        assert_eq!(config.username.as_deref(), Some("legacy@hirelink.dev"));
        assert_eq!(config.password.as_deref(), Some("legacy"));
        assert!(config.has_credentials());
    }

    #[test]
    fn test_sender_falls_back_to_username() {
        let config = MailerConfig::from_lookup(lookup(&[
            ("SMTP_USER", "portal@hirelink.dev"),
            ("SMTP_PASS", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.from_email, "portal@hirelink.dev");
    }

    #[test]
    fn test_non_address_username_is_not_used_as_sender() {
        let config = MailerConfig::from_lookup(lookup(&[
            ("SMTP_USER", "apikey"),
            ("SMTP_PASS", "SG.secret"),
        ]))
        .unwrap();
        assert_eq!(config.from_email, "no-reply@hirelink.dev");
        assert_eq!(config.username.as_deref(), Some("apikey"));
        assert!(config.has_credentials());
    }

    #[test]
    fn test_explicit_sender_wins_over_username() {
        let config = MailerConfig::from_lookup(lookup(&[
            ("SMTP_USER", "portal@hirelink.dev"),
            ("SMTP_FROM", "careers@hirelink.dev"),
        ]))
        .unwrap();
        assert_eq!(config.from_email, "careers@hirelink.dev");
    }

    #[test]
    fn test_partial_credentials_still_load() {
        let config =
            MailerConfig::from_lookup(lookup(&[("SMTP_USER", "portal@hirelink.dev")])).unwrap();
        assert!(config.username.is_some());
        assert!(config.password.is_none());
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_secure_and_port_override() {
        let config = MailerConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "mail.hirelink.dev"),
            ("SMTP_PORT", "465"),
            ("SMTP_SECURE", "true"),
        ]))
        .unwrap();
        assert_eq!(config.host, "mail.hirelink.dev");
        assert_eq!(config.port, 465);
        assert!(config.secure);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = MailerConfig::from_lookup(lookup(&[("SMTP_PORT", "smtp")])).unwrap_err();
        assert!(matches!(err, MailerError::Config(_)));
        assert!(err.to_string().contains("SMTP_PORT"));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let err = MailerConfig::from_lookup(lookup(&[("SMTP_TIMEOUT_SECS", "-5")])).unwrap_err();
        assert!(err.to_string().contains("SMTP_TIMEOUT_SECS"));
    }

    #[test]
    fn test_invalid_sender_address_is_rejected() {
        let err = MailerConfig::from_lookup(lookup(&[("SMTP_FROM", "not-an-address")])).unwrap_err();
        assert!(matches!(err, MailerError::Config(_)));
    }

    #[test]
    fn test_timeout_duration() {
        let config =
            MailerConfig::from_lookup(lookup(&[("SMTP_TIMEOUT_SECS", "10")])).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
