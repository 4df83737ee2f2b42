use serde::{Deserialize, Serialize};

/// Contact-form relay submission. `company` is a honeypot field: humans
/// never see it, so a non-empty value marks the sender as a bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub ok: bool,
}
