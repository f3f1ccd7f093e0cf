use super::{EmailError, MailContent, MailTransport};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailTransport {
    pub fn new(
        host: String,
        port: u16,
        username: Option<String>,
        password: Option<String>,
        from: String,
    ) -> Result<Self, EmailError> {
        let tls_params = TlsParameters::new(host.clone())
            .map_err(|e| EmailError::InvalidConfig(format!("TLS configuration error: {}", e)))?;

        // Port 465 uses implicit TLS (SMTPS), other ports use STARTTLS
        let mut builder = if port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
                .map_err(|e| EmailError::InvalidConfig(format!("SMTP relay error: {}", e)))?
                .port(port)
                .tls(Tls::Wrapper(tls_params))
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
                .map_err(|e| EmailError::InvalidConfig(format!("SMTP relay error: {}", e)))?
                .port(port)
                .tls(Tls::Required(tls_params))
        };

        if let (Some(user), Some(pass)) = (username, password) {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn deliver(&self, to: String, content: MailContent) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| EmailError::InvalidConfig(format!("Invalid from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| EmailError::InvalidConfig(format!("Invalid to address: {}", e)))?)
            .subject(content.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(content.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(content.html),
                    ),
            )
            .map_err(|e| EmailError::SendFailed(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_builds_with_credentials() {
        let transport = SmtpMailTransport::new(
            "localhost".to_string(),
            587,
            Some("user".to_string()),
            Some("pass".to_string()),
            "Casting App <no-reply@localhost>".to_string(),
        );
        assert!(transport.is_ok());
    }

    #[test]
    fn transport_builds_on_implicit_tls_port() {
        let transport = SmtpMailTransport::new(
            "smtp.example.com".to_string(),
            465,
            None,
            None,
            "no-reply@example.com".to_string(),
        );
        assert!(transport.is_ok());
    }
}
