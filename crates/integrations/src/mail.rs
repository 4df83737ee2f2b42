use async_trait::async_trait;
use eyre::{eyre, Result};
use serde::Serialize;
use slotline_core::errors::{FunnelError, FunnelResult};
use std::env;
use tracing::warn;

const SENDGRID_BASE_URL: &str = "https://api.sendgrid.com";

/// A plain-text email ready to hand to whichever provider is configured.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub from: String,
    pub subject: String,
    pub body: String,
    pub reply_to: Option<String>,
}

/// Sends transactional email on behalf of the booking funnel.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> FunnelResult<()>;
}

/// Sender identity and operator recipients for outgoing mail.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: String,
    pub from: String,
    pub owner_to: Vec<String>,
}

impl MailConfig {
    /// Loads mail settings from the environment. All variables absent means
    /// mail is disabled (`Ok(None)`); a partial set fails startup.
    pub fn from_env() -> Result<Option<Self>> {
        let api_key = env::var("SENDGRID_API_KEY").ok();
        let from = env::var("CONTACT_FROM_EMAIL").ok();
        let to_raw = env::var("CONTACT_TO_EMAIL").ok();

        match (api_key, from, to_raw) {
            (Some(api_key), Some(from), Some(to_raw)) => {
                let owner_to = parse_email_list(&to_raw);
                if owner_to.is_empty() {
                    return Err(eyre!("CONTACT_TO_EMAIL is set but contains no addresses"));
                }
                Ok(Some(Self {
                    api_key,
                    from,
                    owner_to,
                }))
            }
            (None, None, None) => Ok(None),
            _ => Err(eyre!(
                "Partial mail configuration: set all of SENDGRID_API_KEY, CONTACT_FROM_EMAIL, CONTACT_TO_EMAIL or none"
            )),
        }
    }
}

/// Splits a comma-separated recipient list, dropping blanks.
pub fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// SendGrid implementation of [`Mailer`].
pub struct SendGridMailer {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SendGridMailer {
    pub fn new(api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: SENDGRID_BASE_URL.to_string(),
        }
    }

    /// Overrides the provider endpoint, for tests against a local server.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, message: &EmailMessage) -> FunnelResult<()> {
        let payload = SendPayload {
            personalizations: vec![Personalization {
                to: message.to.iter().map(|email| Address::new(email)).collect(),
            }],
            from: Address::new(&message.from),
            subject: message.subject.clone(),
            content: vec![Content {
                content_type: "text/plain".to_string(),
                value: message.body.clone(),
            }],
            reply_to: message.reply_to.as_deref().map(Address::new),
        };

        let url = format!("{}/v3/mail/send", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!("Mail provider request failed: {e}");
                FunnelError::Upstream("Email provider unavailable".to_string())
            })?;

        if !response.status().is_success() {
            // Keep the provider body out of client responses.
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Mail provider rejected send: status={status} body={body}");
            return Err(FunnelError::Upstream("Email send failed".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SendPayload {
    personalizations: Vec<Personalization>,
    from: Address,
    subject: String,
    content: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Address>,
}

#[derive(Debug, Serialize)]
struct Personalization {
    to: Vec<Address>,
}

#[derive(Debug, Serialize)]
struct Address {
    email: String,
}

impl Address {
    fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}
