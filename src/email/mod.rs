//! Outbound email: OTP and password-reset messages.
//!
//! Sends run as spawned tasks; callers get a `JoinHandle` and decide
//! whether to await delivery or drop it.

mod smtp;
mod templates;

pub use smtp::SmtpMailTransport;
pub use templates::MailContent;

use crate::config::Config;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Invalid mail configuration: {0}")]
    InvalidConfig(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, to: String, content: MailContent) -> Result<(), EmailError>;
}

/// Transport used when no SMTP host is configured: logs the message
/// instead of sending it. Keeps local development and tests off the wire.
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    async fn deliver(&self, to: String, content: MailContent) -> Result<(), EmailError> {
        tracing::info!(to = %to, subject = %content.subject, "SMTP not configured, logging email instead of sending");
        Ok(())
    }
}

#[derive(Clone)]
pub struct Mailer {
    transport: Arc<dyn MailTransport>,
}

impl Mailer {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    pub fn from_config(config: &Config) -> Result<Self, EmailError> {
        let transport: Arc<dyn MailTransport> = match &config.smtp_host {
            Some(host) => Arc::new(SmtpMailTransport::new(
                host.clone(),
                config.smtp_port,
                config.smtp_username.clone(),
                config.smtp_password.clone(),
                config.mail_from.clone(),
            )?),
            None => Arc::new(LogTransport),
        };
        Ok(Self::new(transport))
    }

    pub fn send_otp(&self, to: &str, code: &str) -> JoinHandle<Result<(), EmailError>> {
        self.spawn_send(to, templates::otp_email(code))
    }

    pub fn send_reset_code(&self, to: &str, code: &str) -> JoinHandle<Result<(), EmailError>> {
        self.spawn_send(to, templates::reset_email(code))
    }

    fn spawn_send(&self, to: &str, content: MailContent) -> JoinHandle<Result<(), EmailError>> {
        let transport = self.transport.clone();
        let to = to.to_string();
        tokio::spawn(async move { transport.deliver(to, content).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_otp_delivers_through_transport() {
        let mut transport = MockMailTransport::new();
        transport
            .expect_deliver()
            .withf(|to, content| to == "a@example.com" && content.text.contains("123456"))
            .times(1)
            .returning(|_, _| Ok(()));

        let mailer = Mailer::new(Arc::new(transport));
        let result = mailer.send_otp("a@example.com", "123456").await.unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn transport_failure_surfaces_to_awaiter() {
        let mut transport = MockMailTransport::new();
        transport
            .expect_deliver()
            .returning(|_, _| Err(EmailError::SendFailed("relay down".into())));

        let mailer = Mailer::new(Arc::new(transport));
        let result = mailer.send_reset_code("a@example.com", "654321").await.unwrap();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn log_transport_always_succeeds() {
        let mailer = Mailer::new(Arc::new(LogTransport));
        let result = mailer.send_otp("a@example.com", "000001").await.unwrap();
        assert!(result.is_ok());
    }
}
