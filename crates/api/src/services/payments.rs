//! Hosted checkout client.
//!
//! Talks to the payment provider's REST API: creating a checkout session
//! returns a redirect URL for the client; verification fetches the session
//! back and reports whether the purchase completed. Webhook handling is
//! intentionally absent; the client polls the verify endpoint instead.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::config::PaymentsConfig;

/// Errors from the checkout provider.
#[derive(Debug, Error)]
pub enum PaymentsError {
    #[error("Payments are not enabled")]
    Disabled,

    #[error("Provider request failed: {0}")]
    Http(String),

    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),
}

/// A freshly created checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// A checkout session fetched for verification.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionDetails {
    pub id: String,
    /// Provider-side status: "complete", "open", or "expired".
    pub status: String,
    pub customer: Option<String>,
    pub subscription: Option<String>,
    /// Unix timestamp of the end of the paid period.
    pub current_period_end: Option<i64>,
}

impl SessionDetails {
    pub fn is_complete(&self) -> bool {
        self.status == "complete"
    }

    pub fn is_open(&self) -> bool {
        self.status == "open"
    }

    /// The paid-through timestamp, if the provider reported one.
    pub fn period_end(&self) -> Option<DateTime<Utc>> {
        self.current_period_end
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    }
}

#[derive(Debug, Serialize)]
struct CreateSessionBody<'a> {
    price_id: &'a str,
    customer_email: &'a str,
    client_reference_id: String,
    success_url: &'a str,
    cancel_url: &'a str,
}

/// Client for the hosted checkout provider.
pub struct CheckoutClient {
    config: PaymentsConfig,
    http: reqwest::Client,
}

impl CheckoutClient {
    /// Creates a client from configuration. Returns `None` when payments are
    /// disabled.
    pub fn from_config(config: &PaymentsConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .ok()?;

        Some(Self {
            config: config.clone(),
            http,
        })
    }

    /// Creates a checkout session for the premium plan, tagged with the user
    /// id so verification can attribute the purchase.
    pub async fn create_session(
        &self,
        user_id: Uuid,
        customer_email: &str,
    ) -> Result<CheckoutSession, PaymentsError> {
        let url = format!(
            "{}/v1/checkout/sessions",
            self.config.api_base_url.trim_end_matches('/')
        );

        let body = CreateSessionBody {
            price_id: &self.config.price_id,
            customer_email,
            client_reference_id: user_id.to_string(),
            success_url: &self.config.success_url,
            cancel_url: &self.config.cancel_url,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentsError::Http(e.to_string()))?;

        Self::parse(response).await
    }

    /// Fetches a session back for verification.
    pub async fn fetch_session(&self, session_id: &str) -> Result<SessionDetails, PaymentsError> {
        let url = format!(
            "{}/v1/checkout/sessions/{}",
            self.config.api_base_url.trim_end_matches('/'),
            session_id
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.secret_key)
            .send()
            .await
            .map_err(|e| PaymentsError::Http(e.to_string()))?;

        Self::parse(response).await
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PaymentsError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentsError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PaymentsError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_config_yields_no_client() {
        let config = PaymentsConfig::default();
        assert!(CheckoutClient::from_config(&config).is_none());
    }

    #[test]
    fn test_session_details_status_helpers() {
        let details = SessionDetails {
            id: "cs_1".to_string(),
            status: "complete".to_string(),
            customer: Some("cus_1".to_string()),
            subscription: Some("sub_1".to_string()),
            current_period_end: Some(1_900_000_000),
        };
        assert!(details.is_complete());
        assert!(!details.is_open());
        assert!(details.period_end().is_some());

        let open = SessionDetails {
            id: "cs_2".to_string(),
            status: "open".to_string(),
            customer: None,
            subscription: None,
            current_period_end: None,
        };
        assert!(open.is_open());
        assert_eq!(open.period_end(), None);
    }
}
