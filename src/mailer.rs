//! SMTP delivery of the rendered notification.
//!
//! One send attempt per run. Delivery failure surfaces to the caller; there
//! is no retry queue, since the next scheduled run covers the same window
//! as long as the lookback is at least the scheduling interval.

use std::error::Error;

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{info, instrument};

/// Everything the transport needs, read once at startup.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub to: String,
}

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl Mailer {
    /// Build a STARTTLS relay against the configured host.
    pub fn new(settings: &SmtpSettings) -> Result<Self, Box<dyn Error>> {
        let credentials = Credentials::new(settings.username.clone(), settings.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(credentials)
            .build();
        Ok(Self {
            transport,
            from: settings.from.parse()?,
            to: settings.to.parse()?,
        })
    }

    #[instrument(level = "info", skip(self, html_body), fields(to = %self.to))]
    pub async fn send(&self, subject: &str, html_body: String) -> Result<(), Box<dyn Error>> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)?;
        self.transport.send(message).await?;
        info!("notification email sent");
        Ok(())
    }
}
