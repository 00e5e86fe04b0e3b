/**
 * Mail Sender
 *
 * `Mailer` is the seam between the auth workflow and the outside world.
 * Sending is awaited inline by the caller; a failure is reported back as a
 * `MailError` and it is up to the caller whether that matters.
 */

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::shared::SmtpConfig;

/// Mail delivery failures
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Something that can deliver a plain-text email
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Delivers mail through an SMTP relay with STARTTLS
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    /// Build the relay transport
    ///
    /// No connection is opened until the first message is sent.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(config.username.clone(), config.password.clone()))
            .timeout(Some(std::time::Duration::from_secs(10)))
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let email = Message::builder()
            .from(format!("Bookshelf <{}>", self.from).parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(email).await?;
        tracing::info!("Email sent to {}", to);
        Ok(())
    }
}

/// Writes outgoing mail to the log instead of sending it
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        tracing::info!(to = %to, subject = %subject, "SMTP not configured, mail not sent:\n{}", body);
        Ok(())
    }
}

/// Subject and body of the account confirmation mail
pub fn confirmation_email(username: &str, confirm_url: &str) -> (String, String) {
    let subject = "Please verify your email".to_string();
    let body = format!(
        "Hello {username},\n\n\
         Welcome to Bookshelf! Please confirm your email address by opening the link below:\n\n\
         {confirm_url}\n"
    );
    (subject, body)
}
