//! Delivery through the Resend HTTP email API.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use super::{Notification, NotifyError};
use crate::pipeline::Notifier;
use crate::sanitize::{redact_email, truncate_body};

/// Public Resend API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.resend.com";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Splits a comma-separated recipient list, trimming entries and dropping
/// blanks.
pub fn parse_recipients(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

pub struct ResendNotifier {
    client: Client,
    api_base: String,
    api_key: SecretString,
    from: String,
    to: Vec<String>,
}

impl ResendNotifier {
    pub fn new(
        api_base: impl Into<String>,
        api_key: SecretString,
        from: impl Into<String>,
        to: Vec<String>,
    ) -> Result<Self, NotifyError> {
        if to.is_empty() {
            return Err(NotifyError::NoRecipients);
        }
        let client = Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
            from: from.into(),
            to,
        })
    }

    pub fn recipients(&self) -> &[String] {
        &self.to
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.api_base)
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let body = SendEmailRequest {
            from: &self.from,
            to: &self.to,
            subject: &notification.subject,
            html: &notification.html,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = truncate_body(&body);
            warn!("Resend rejected email ({}): {}", status, body);
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(
            "Notification '{}' delivered to {} recipient(s), first {}",
            notification.subject,
            self.to.len(),
            redact_email(&self.to[0])
        );
        Ok(())
    }
}
