//! Error types for the gchat-notify core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them for callers that want a
//! single error type.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Notification(#[from] NotificationError),
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors from action-input validation.
#[derive(Debug, Error)]
pub enum InputError {
    /// A required input was absent or empty.
    #[error("input required and not supplied: {0}")]
    Missing(&'static str),
}

// ---------------------------------------------------------------------------
// Notification errors
// ---------------------------------------------------------------------------

/// Errors from webhook delivery.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// HTTP-level transport error (network, TLS, etc.).
    #[error("webhook HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook endpoint returned a non-success status code.
    #[error("webhook returned HTTP {status}: {body}")]
    Webhook { status: u16, body: String },
}
