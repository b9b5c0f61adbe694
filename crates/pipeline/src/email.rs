//! Completion notification over SMTP.
//!
//! When a story run finishes, the account owner gets a short plain-text
//! email. Delivery is optional: [`EmailConfig::from_env`] yields `None`
//! when `SMTP_HOST` is absent and the pipeline skips the stage.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use fablehouse_core::types::DbId;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Failures raised while sending a notification email.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// Connection, TLS, or authentication failure in the SMTP session.
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// Sender or recipient address did not parse.
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message itself could not be assembled.
    #[error("Could not assemble message: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "noreply@fablehouse.local";

/// SMTP settings for the completion email.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub from_address: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl EmailConfig {
    /// Read SMTP settings, or `None` when `SMTP_HOST` is unset.
    ///
    /// | Variable        | Required | Default                     |
    /// |-----------------|----------|-----------------------------|
    /// | `SMTP_HOST`     | yes      | —                           |
    /// | `SMTP_PORT`     | no       | `587` (STARTTLS)            |
    /// | `SMTP_FROM`     | no       | `noreply@fablehouse.local`  |
    /// | `SMTP_USER`     | no       | —                           |
    /// | `SMTP_PASSWORD` | no       | —                           |
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;

        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);

        Some(Self {
            host,
            port,
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            username: std::env::var("SMTP_USER").ok(),
            password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// StoryMailer
// ---------------------------------------------------------------------------

/// Sends the story-ready email.
pub struct StoryMailer {
    config: EmailConfig,
}

impl StoryMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Tell the account owner that `child_name`'s story can be read.
    pub async fn send_story_ready(
        &self,
        to_email: &str,
        child_name: &str,
        story_id: DbId,
    ) -> Result<(), EmailError> {
        let body = format!(
            "Hi there!\n\n\
             {child_name}'s new illustrated story has finished generating \
             and is ready to read.\n\n\
             Story id: {story_id}\n\n\
             Happy storytelling!"
        );

        let message = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(format!("{child_name}'s story is ready!"))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        self.transport()?.send(message).await?;
        tracing::info!(to = to_email, story_id, "Story-ready email sent");
        Ok(())
    }

    /// Builds a fresh relay per send; no connection state outlives a run.
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            .port(self.config.port);

        if let (Some(user), Some(pass)) = (&self.config.username, &self.config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(builder.build())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
