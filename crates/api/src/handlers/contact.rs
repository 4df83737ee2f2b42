//! # Contact Relay
//!
//! Thin relay from the public contact form to the operator inbox. A filled
//! honeypot field gets a fake success so bots learn nothing.

use axum::{extract::State, Json};
use std::sync::Arc;

use slotline_core::errors::FunnelError;
use slotline_core::models::booking::is_valid_email;
use slotline_core::models::contact::{ContactRequest, ContactResponse};
use slotline_integrations::mail::EmailMessage;

use crate::middleware::error_handling::AppError;
use crate::ApiState;

#[axum::debug_handler]
pub async fn send_contact(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    if !payload.company.is_empty() {
        // Honeypot tripped: pretend success.
        return Ok(Json(ContactResponse { ok: true }));
    }

    let email = payload.email.trim().to_string();
    let phone = payload.phone.trim().to_string();
    let message = payload.message.trim().to_string();

    if email.is_empty() || phone.is_empty() || message.is_empty() {
        return Err(AppError(FunnelError::InvalidRequest(
            "Missing fields".to_string(),
        )));
    }
    if !is_valid_email(&email) {
        return Err(AppError(FunnelError::InvalidRequest(
            "Invalid email".to_string(),
        )));
    }
    if phone.len() < 6 || phone.len() > 30 {
        return Err(AppError(FunnelError::InvalidRequest(
            "Invalid phone".to_string(),
        )));
    }
    if message.len() < 2 || message.len() > 5000 {
        return Err(AppError(FunnelError::InvalidRequest(
            "Invalid message".to_string(),
        )));
    }

    let (mail_config, mailer) = match state.mail() {
        Ok(mail) => mail,
        // For the contact relay a missing mail section is a deployment
        // problem, not an upstream outage.
        Err(_) => {
            return Err(AppError(FunnelError::NotConfigured(
                "Email not configured".to_string(),
            )))
        }
    };

    let body = format!("New contact request:\n\nEmail: {email}\nPhone: {phone}\n\nMessage:\n{message}\n");
    let outgoing = EmailMessage {
        to: mail_config.owner_to.clone(),
        from: mail_config.from.clone(),
        subject: "New contact request".to_string(),
        body,
        reply_to: Some(email),
    };
    mailer.send(&outgoing).await?;

    Ok(Json(ContactResponse { ok: true }))
}
