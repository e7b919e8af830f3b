//! gchat-notify core library.
//!
//! Builds Google Chat status cards for CI runs and delivers them to an
//! incoming-webhook URL: input validation, execution-context
//! snapshotting, status/event classification, card assembly, and
//! single-shot dispatch.

pub mod card;
pub mod context;
pub mod errors;
pub mod inputs;
pub mod links;
pub mod notify;
pub mod presentation;

// Re-exports for convenience.
pub use context::RunContext;
pub use errors::{CoreError, InputError, NotificationError};
pub use inputs::NotificationRequest;
pub use notify::{send_notification, ChatNotifier};
