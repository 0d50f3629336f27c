//! Email service for password reset emails.
//!
//! The only fully implemented provider is `console`, which logs the email
//! instead of sending it, which is the right default for development and
//! tests.
//! Unknown providers log a warning and drop the message.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::EmailConfig;

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service disabled")]
    Disabled,

    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub body_text: String,
}

/// Email service for transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Sends a password reset email carrying the reset link.
    pub async fn send_password_reset(
        &self,
        to: &str,
        to_name: Option<&str>,
        reset_token: &str,
    ) -> Result<(), EmailError> {
        let link = if self.config.base_url.is_empty() {
            format!("/reset-password?token={}", reset_token)
        } else {
            format!(
                "{}/reset-password?token={}",
                self.config.base_url.trim_end_matches('/'),
                reset_token
            )
        };

        let message = EmailMessage {
            to: to.to_string(),
            to_name: to_name.map(|s| s.to_string()),
            subject: format!("{} password reset", self.config.sender_name),
            body_text: format!(
                "Hello{},\n\nUse the link below to reset your password. \
                 It is valid for a limited time and can be used once.\n\n{}\n",
                to_name.map(|n| format!(" {}", n)).unwrap_or_default(),
                link
            ),
        };

        self.send(message).await
    }

    /// Sends a message through the configured provider.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            return Err(EmailError::Disabled);
        }

        match self.config.provider.as_str() {
            "console" => {
                info!(
                    to = %message.to,
                    subject = %message.subject,
                    body = %message.body_text,
                    "Email (console provider)"
                );
                Ok(())
            }
            other => {
                warn!(provider = %other, "Unknown email provider, dropping message");
                Err(EmailError::SendFailed(format!(
                    "Unknown email provider: {}",
                    other
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, provider: &str) -> EmailConfig {
        EmailConfig {
            enabled,
            provider: provider.to_string(),
            sender_email: "noreply@lingora.app".to_string(),
            sender_name: "Lingora".to_string(),
            base_url: "https://app.lingora.app".to_string(),
        }
    }

    #[tokio::test]
    async fn test_disabled_service_rejects() {
        let service = EmailService::new(config(false, "console"));
        let result = service.send_password_reset("a@b.c", None, "tok").await;
        assert!(matches!(result, Err(EmailError::Disabled)));
    }

    #[tokio::test]
    async fn test_console_provider_sends() {
        let service = EmailService::new(config(true, "console"));
        let result = service
            .send_password_reset("a@b.c", Some("Ana"), "tok")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_provider_fails() {
        let service = EmailService::new(config(true, "smtp"));
        let result = service.send_password_reset("a@b.c", None, "tok").await;
        assert!(matches!(result, Err(EmailError::SendFailed(_))));
    }
}
