//! Delivery Agent — best-effort email of the rendered guide.
//!
//! Only invoked when rendering produced an artifact; exactly one attempt per
//! request. A transport failure is recorded in the pipeline outcome, never
//! propagated as a request failure.

use async_trait::async_trait;
use bytes::Bytes;
use lettre::message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

use crate::config::Config;

const ATTACHMENT_FILENAME: &str = "networking-guide.pdf";
const SUBJECT: &str = "Your Personalized Networking Guide";

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("mail transport failure: {0}")]
    TransportFailure(String),
}

/// Seam for the orchestrator: lets pipeline tests substitute a stub.
#[async_trait]
pub trait DeliveryAgent: Send + Sync {
    async fn deliver(&self, to: &str, artifact: &Bytes, html_body: &str)
        -> Result<(), DeliveryError>;
}

/// Production agent: SMTP over STARTTLS via lettre.
pub struct SmtpDeliveryAgent {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpDeliveryAgent {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        let from: Mailbox = config
            .mail_from
            .parse()
            .map_err(|e| anyhow::anyhow!("MAIL_FROM is not a valid mailbox: {e}"))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl DeliveryAgent for SmtpDeliveryAgent {
    async fn deliver(
        &self,
        to: &str,
        artifact: &Bytes,
        html_body: &str,
    ) -> Result<(), DeliveryError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| DeliveryError::TransportFailure(format!("invalid recipient: {e}")))?;

        let pdf_type = ContentType::parse("application/pdf")
            .map_err(|e| DeliveryError::TransportFailure(e.to_string()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(SUBJECT)
            .multipart(
                MultiPart::mixed()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    )
                    .singlepart(
                        Attachment::new(ATTACHMENT_FILENAME.to_string())
                            .body(artifact.to_vec(), pdf_type),
                    ),
            )
            .map_err(|e| DeliveryError::TransportFailure(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::TransportFailure(e.to_string()))?;

        info!("Guide emailed to {to}");
        Ok(())
    }
}
