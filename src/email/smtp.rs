//! SMTP mail transport implementation using lettre

use super::transport::{MailTransport, TransportError};
use crate::config::MailerConfig;
use crate::domain::OutgoingEmail;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParametersBuilder},
        PoolConfig,
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, warn};

/// Upper bound on relay connections held by the pool.
pub const POOL_MAX_CONNECTIONS: u32 = 5;

/// SMTP-backed mail transport with a bounded connection pool
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_email: String,
    from_name: String,
}

impl SmtpMailTransport {
    /// Create a pooled transport from configuration. No I/O happens here;
    /// connections are established lazily on first send.
    pub fn from_config(config: &MailerConfig) -> Result<Self, TransportError> {
        let mut tls_builder = TlsParametersBuilder::new(config.host.clone());
        if config.accept_invalid_certs {
            warn!(host = %config.host, "relay certificate validation disabled");
            tls_builder = tls_builder
                .dangerous_accept_invalid_certs(true)
                .dangerous_accept_invalid_hostnames(true);
        }
        let tls_parameters = tls_builder
            .build()
            .map_err(|e| TransportError::Configuration(e.to_string()))?;

        // secure: TLS from the first byte (implicit TLS, port 465 style).
        // Otherwise start plain and upgrade via STARTTLS when the relay
        // offers it.
        let tls = if config.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls)
            .timeout(Some(config.timeout()))
            .pool_config(PoolConfig::new().max_size(POOL_MAX_CONNECTIONS));

        // Add credentials if provided; relays that allow it accept
        // unauthenticated submission
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            let credentials = Credentials::new(username.clone(), password.clone());
            builder = builder.credentials(credentials);
        }

        Ok(Self {
            transport: builder.build(),
            from_email: config.from_email.clone(),
            from_name: config.from_name.clone(),
        })
    }

    fn build_from_mailbox(&self) -> Result<Mailbox, TransportError> {
        let mailbox = if self.from_name.is_empty() {
            self.from_email.clone()
        } else {
            format!("{} <{}>", self.from_name, self.from_email)
        };

        mailbox.parse().map_err(|e| {
            TransportError::Configuration(format!("Invalid from address: {}", e))
        })
    }

    /// Assemble the wire message: headers plus an HTML body, or a
    /// multipart/alternative when a plain-text body is present.
    fn assemble(&self, mail: &OutgoingEmail) -> Result<Message, TransportError> {
        let from = self.build_from_mailbox()?;

        let to: Mailbox = mail.to.parse().map_err(|e| {
            TransportError::Message(format!("Invalid to address: {}", e))
        })?;

        let builder = Message::builder().from(from).to(to).subject(&mail.subject);

        let message = if let Some(text_body) = &mail.text_body {
            builder
                .multipart(
                    MultiPart::alternative()
                        .singlepart(
                            SinglePart::builder()
                                .header(ContentType::TEXT_PLAIN)
                                .body(text_body.clone()),
                        )
                        .singlepart(
                            SinglePart::builder()
                                .header(ContentType::TEXT_HTML)
                                .body(mail.html_body.clone()),
                        ),
                )
                .map_err(|e| TransportError::Message(e.to_string()))?
        } else {
            builder
                .header(ContentType::TEXT_HTML)
                .body(mail.html_body.clone())
                .map_err(|e| TransportError::Message(e.to_string()))?
        };

        Ok(message)
    }
}

/// Sort a lettre failure into the transport error taxonomy by message text.
fn classify_send_error(error_msg: String) -> TransportError {
    if error_msg.contains("authentication") || error_msg.contains("AUTH") {
        TransportError::Authentication(error_msg)
    } else if error_msg.contains("connection") || error_msg.contains("timeout") {
        TransportError::Connection(error_msg)
    } else {
        TransportError::Rejected(error_msg)
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, mail: &OutgoingEmail) -> Result<(), TransportError> {
        let message = self.assemble(mail)?;

        match self.transport.send(message).await {
            Ok(response) => {
                // First line of the relay reply, e.g. "2.0.0 OK"
                let reply = response.message().next().map(|s| s.to_string());
                debug!(to = %mail.to, reply = ?reply, "message accepted by relay");
                Ok(())
            }
            Err(e) => Err(classify_send_error(e.to_string())),
        }
    }

    async fn test_connection(&self) -> Result<(), TransportError> {
        self.transport
            .test_connection()
            .await
            .map(|_| ()) // Convert bool to ()
            .map_err(|e| {
                let error_msg = e.to_string();
                if error_msg.contains("authentication") || error_msg.contains("AUTH") {
                    TransportError::Authentication(error_msg)
                } else {
                    TransportError::Connection(error_msg)
                }
            })
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
