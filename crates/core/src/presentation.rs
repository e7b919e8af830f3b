//! Status and event classification.
//!
//! Pure lookups from the raw status / event strings to the colors, labels,
//! icon keys, and link targets the card renders with. Every input has a
//! defined fallback; presentation never blocks delivery.

use crate::context::{RunContext, UNSET};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Recognized status classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Failure,
    /// Anything that is neither success nor failure: cancelled runs,
    /// unknown strings, the empty string.
    Cancelled,
}

impl StatusKind {
    /// Classify a raw status string, case-insensitively.
    pub fn classify(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "failure" => Self::Failure,
            _ => Self::Cancelled,
        }
    }

    /// Hex color for the status label.
    pub fn color(self) -> &'static str {
        match self {
            Self::Success => "#2cbe4e",
            Self::Failure => "#ff0000",
            Self::Cancelled => "#ffc107",
        }
    }

    /// Key selecting the `status_{key}.png` icon asset.
    pub fn icon_key(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Presentation attributes derived from the raw status input.
#[derive(Debug, Clone)]
pub struct StatusPresentation {
    pub kind: StatusKind,
    pub color: &'static str,

    /// Raw status with its first character upper-cased, remainder
    /// untouched (`FAILURE` stays `FAILURE`).
    pub label: String,
}

impl StatusPresentation {
    pub fn derive(raw: &str) -> Self {
        let kind = StatusKind::classify(raw);
        Self {
            kind,
            color: kind.color(),
            label: capitalize_first(raw),
        }
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// Recognized event classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PullRequest,
    Push,
    WorkflowDispatch,
}

impl EventKind {
    /// Classify a raw event name, case-insensitively. Unknown and absent
    /// events read as plain pushes.
    pub fn classify(event_name: Option<&str>) -> Self {
        match event_name.map(|e| e.to_ascii_lowercase()).as_deref() {
            Some("pull_request") => Self::PullRequest,
            Some("workflow_dispatch") => Self::WorkflowDispatch,
            _ => Self::Push,
        }
    }

    /// Key selecting the `event_{key}.png` icon asset.
    pub fn key(self) -> &'static str {
        match self {
            Self::PullRequest => "pull_request",
            Self::Push => "push",
            Self::WorkflowDispatch => "workflow_dispatch",
        }
    }

    /// Human-readable event label.
    pub fn label(self) -> &'static str {
        match self {
            Self::PullRequest => "Pull Request",
            Self::Push => "Push",
            Self::WorkflowDispatch => "Workflow Dispatch",
        }
    }
}

/// Presentation attributes derived from the triggering event.
#[derive(Debug, Clone)]
pub struct EventPresentation {
    pub kind: EventKind,
    pub label: &'static str,

    /// Repository-relative path the event links to.
    pub target_path: String,
}

impl EventPresentation {
    pub fn derive(ctx: &RunContext) -> Self {
        let kind = EventKind::classify(ctx.event_name.as_deref());
        let target_path = match kind {
            EventKind::PullRequest => {
                format!("/pull/{}", ctx.issue_number.as_deref().unwrap_or(UNSET))
            }
            _ => format!("/commit/{}", ctx.sha),
        };
        Self {
            kind,
            label: kind.label(),
            target_path,
        }
    }
}
