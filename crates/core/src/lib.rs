//! # Slotline Core
//!
//! Shared domain types for the Slotline booking service: the error taxonomy
//! used across every crate, and the request/response models exchanged at the
//! API boundary. This crate has no I/O; the db, integrations, and api crates
//! all depend on it.

/// Error taxonomy shared by all components
pub mod errors;
/// Domain and API boundary models
pub mod models;
