use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use slotline_core::errors::{FunnelError, FunnelResult};
use slotline_core::models::meeting::{non_empty, MeetingDetails, MeetingRequest};
use std::env;
use tracing::warn;

const ZOOM_AUTH_BASE_URL: &str = "https://zoom.us";
const ZOOM_API_BASE_URL: &str = "https://api.zoom.us";

/// Creates meeting rooms for confirmed bookings.
#[async_trait]
pub trait MeetingProvider: Send + Sync {
    async fn create_meeting(&self, request: &MeetingRequest) -> FunnelResult<MeetingDetails>;
}

/// Credentials for the Zoom server-to-server OAuth app.
#[derive(Debug, Clone)]
pub struct ZoomConfig {
    pub client_id: String,
    pub client_secret: String,
    pub account_id: String,
}

impl ZoomConfig {
    /// Loads Zoom credentials from the environment. All three variables
    /// absent means the meeting integration is disabled (`Ok(None)`); a
    /// partial set is a deployment mistake and fails startup.
    pub fn from_env() -> Result<Option<Self>> {
        let client_id = env::var("ZOOM_CLIENT_ID").ok();
        let client_secret = env::var("ZOOM_CLIENT_SECRET").ok();
        let account_id = env::var("ZOOM_ACCOUNT_ID").ok();

        match (client_id, client_secret, account_id) {
            (Some(client_id), Some(client_secret), Some(account_id)) => Ok(Some(Self {
                client_id,
                client_secret,
                account_id,
            })),
            (None, None, None) => Ok(None),
            _ => Err(eyre!(
                "Partial Zoom configuration: set all of ZOOM_CLIENT_ID, ZOOM_CLIENT_SECRET, ZOOM_ACCOUNT_ID or none"
            )),
        }
    }
}

/// Zoom implementation of [`MeetingProvider`].
///
/// Each meeting request fetches an account-credentials token and then
/// creates a scheduled meeting with a waiting room and host approval, so no
/// unvetted participant can join.
pub struct ZoomMeetings {
    http: reqwest::Client,
    config: ZoomConfig,
    auth_base_url: String,
    api_base_url: String,
}

impl ZoomMeetings {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            auth_base_url: ZOOM_AUTH_BASE_URL.to_string(),
            api_base_url: ZOOM_API_BASE_URL.to_string(),
        }
    }

    /// Overrides the provider endpoints, for tests against a local server.
    pub fn with_base_urls(config: ZoomConfig, auth_base_url: &str, api_base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            auth_base_url: auth_base_url.to_string(),
            api_base_url: api_base_url.to_string(),
        }
    }

    async fn access_token(&self) -> FunnelResult<String> {
        let basic = STANDARD.encode(format!(
            "{}:{}",
            self.config.client_id, self.config.client_secret
        ));
        let url = format!(
            "{}/oauth/token?grant_type=account_credentials&account_id={}",
            self.auth_base_url, self.config.account_id
        );

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Basic {basic}"))
            .send()
            .await
            .map_err(|e| {
                warn!("Zoom token request failed: {e}");
                FunnelError::Upstream("Meeting provider unavailable".to_string())
            })?;

        if !response.status().is_success() {
            warn!("Zoom token request rejected: status={}", response.status());
            return Err(FunnelError::Upstream(
                "Meeting provider rejected credentials".to_string(),
            ));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            warn!("Zoom token response malformed: {e}");
            FunnelError::Upstream("Meeting provider returned a malformed response".to_string())
        })?;

        match token.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(FunnelError::Upstream(
                "Meeting provider returned no access token".to_string(),
            )),
        }
    }
}

#[async_trait]
impl MeetingProvider for ZoomMeetings {
    async fn create_meeting(&self, request: &MeetingRequest) -> FunnelResult<MeetingDetails> {
        let token = self.access_token().await?;

        let payload = CreateMeetingPayload {
            topic: request.topic.clone(),
            // Type 2 is a scheduled (non-recurring) meeting.
            meeting_type: 2,
            start_time: request.start_time.to_rfc3339(),
            timezone: request.timezone.clone(),
            duration: request.duration_minutes,
            settings: MeetingSettings {
                join_before_host: false,
                waiting_room: true,
                approval_type: 2,
            },
        };

        let url = format!("{}/v2/users/me/meetings", self.api_base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!("Zoom meeting request failed: {e}");
                FunnelError::Upstream("Meeting provider unavailable".to_string())
            })?;

        if !response.status().is_success() {
            warn!("Zoom meeting creation rejected: status={}", response.status());
            return Err(FunnelError::Upstream(
                "Meeting creation failed".to_string(),
            ));
        }

        let meeting: MeetingResponse = response.json().await.map_err(|e| {
            warn!("Zoom meeting response malformed: {e}");
            FunnelError::Upstream("Meeting provider returned a malformed response".to_string())
        })?;

        Ok(MeetingDetails {
            id: meeting.id.map(|id| id.to_string()),
            join_url: non_empty(meeting.join_url),
            host_url: non_empty(meeting.start_url),
            passcode: non_empty(meeting.password),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateMeetingPayload {
    topic: String,
    #[serde(rename = "type")]
    meeting_type: i32,
    start_time: String,
    timezone: String,
    duration: i64,
    settings: MeetingSettings,
}

#[derive(Debug, Serialize)]
struct MeetingSettings {
    join_before_host: bool,
    waiting_room: bool,
    approval_type: i32,
}

#[derive(Debug, Deserialize)]
struct MeetingResponse {
    id: Option<i64>,
    join_url: Option<String>,
    start_url: Option<String>,
    password: Option<String>,
}
