//! # Slotline Integrations
//!
//! Outbound HTTP adapters for the two upstreams the booking protocol
//! depends on: the video-meeting provider and the transactional-email
//! provider. Each sits behind a trait so handlers (and tests) never touch a
//! vendor client directly, and provider error bodies are logged but never
//! forwarded to API clients.

/// Transactional email adapter
pub mod mail;
/// Video-meeting provider adapter
pub mod meetings;
