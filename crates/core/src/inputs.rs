//! Action-input validation.
//!
//! The four invocation inputs arrive as raw optional strings from the
//! hosting CI environment. [`NotificationRequest`] checks the required
//! ones and parses the collapse threshold leniently.

use tracing::warn;

use crate::errors::InputError;

/// Collapse threshold meaning "the card section is never collapsed".
pub const NO_COLLAPSE: i64 = -1;

/// Validated invocation inputs, immutable once built.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    /// Display name of the CI run; also the card id and title.
    pub name: String,

    /// Webhook endpoint the card is POSTed to.
    pub url: String,

    /// Free-text run status (`success`, `failure`, anything else).
    pub status: String,

    /// Number of widgets kept visible before the section collapses.
    /// Negative means the section is not collapsible.
    pub collapse: i64,
}

impl NotificationRequest {
    /// Build a request from raw input values.
    ///
    /// `name`, `url`, and `status` are required; an absent or empty value
    /// is an input error. The collapse threshold falls back to
    /// [`NO_COLLAPSE`] when absent or unparsable.
    pub fn new(
        name: Option<String>,
        url: Option<String>,
        status: Option<String>,
        collapse: Option<String>,
    ) -> Result<Self, InputError> {
        Ok(Self {
            name: required("name", name)?,
            url: required("url", url)?,
            status: required("status", status)?,
            collapse: parse_collapse(collapse.as_deref()),
        })
    }
}

fn required(input: &'static str, value: Option<String>) -> Result<String, InputError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(InputError::Missing(input)),
    }
}

fn parse_collapse(raw: Option<&str>) -> i64 {
    match raw {
        None | Some("") => NO_COLLAPSE,
        Some(s) => s.trim().parse().unwrap_or_else(|_| {
            warn!(collapse = %s, "collapse input is not an integer, section will not collapse");
            NO_COLLAPSE
        }),
    }
}
