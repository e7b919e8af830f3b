//! Execution-context snapshot for one CI run.
//!
//! Mirrors the ambient values a GitHub Actions runner exports: the
//! `GITHUB_*` environment variables plus the JSON event payload on disk.
//! The snapshot is taken once per invocation and passed explicitly to the
//! core functions, so they stay deterministic under test.

use std::env;
use std::fs;

use serde_json::Value;
use tracing::{debug, warn};

/// Literal value carried by context fields the runner leaves unset.
///
/// It flows into the card subtitle and URLs untouched; downstream
/// consumers depend on seeing the raw value.
pub const UNSET: &str = "undefined";

/// Read-only snapshot of the run's execution context.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Repository owner (the half of `GITHUB_REPOSITORY` before the slash).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Triggering event name (`push`, `pull_request`, ...); `None` when
    /// the environment does not provide one.
    pub event_name: Option<String>,

    /// Fully qualified ref, e.g. `refs/heads/main`.
    pub ref_name: String,

    /// Commit SHA the run was triggered for.
    pub sha: String,

    /// Login of the user that triggered the run.
    pub actor: String,

    /// Workflow name.
    pub workflow: String,

    /// Issue or pull-request number, when the event payload carries one.
    pub issue_number: Option<String>,
}

impl RunContext {
    /// Snapshot the context from the process environment.
    pub fn from_env() -> Self {
        let repository = env::var("GITHUB_REPOSITORY").ok();
        let (owner, repo) = split_repository(repository.as_deref());

        let issue_number = env::var("GITHUB_EVENT_PATH")
            .ok()
            .and_then(|path| read_event_payload(&path))
            .and_then(|payload| issue_number_from_payload(&payload));

        Self {
            owner,
            repo,
            event_name: env::var("GITHUB_EVENT_NAME")
                .ok()
                .filter(|v| !v.is_empty()),
            ref_name: env::var("GITHUB_REF").unwrap_or_else(|_| UNSET.into()),
            sha: env::var("GITHUB_SHA").unwrap_or_else(|_| UNSET.into()),
            actor: env::var("GITHUB_ACTOR").unwrap_or_else(|_| UNSET.into()),
            workflow: env::var("GITHUB_WORKFLOW").unwrap_or_else(|_| UNSET.into()),
            issue_number,
        }
    }
}

fn split_repository(repository: Option<&str>) -> (String, String) {
    match repository.and_then(|r| r.split_once('/')) {
        Some((owner, repo)) => (owner.to_string(), repo.to_string()),
        None => (UNSET.to_string(), UNSET.to_string()),
    }
}

fn read_event_payload(path: &str) -> Option<Value> {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(path, error = %e, "event payload is not valid JSON");
                None
            }
        },
        Err(e) => {
            debug!(path, error = %e, "no readable event payload");
            None
        }
    }
}

/// Look up the issue / PR number in the payload locations GitHub uses.
pub fn issue_number_from_payload(payload: &Value) -> Option<String> {
    payload["issue"]["number"]
        .as_i64()
        .or_else(|| payload["pull_request"]["number"].as_i64())
        .or_else(|| payload["number"].as_i64())
        .map(|n| n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_repository() {
        assert_eq!(
            split_repository(Some("acme/widgets")),
            ("acme".to_string(), "widgets".to_string())
        );
    }

    #[test]
    fn test_split_repository_unset() {
        assert_eq!(
            split_repository(None),
            (UNSET.to_string(), UNSET.to_string())
        );
        assert_eq!(
            split_repository(Some("noslash")),
            (UNSET.to_string(), UNSET.to_string())
        );
    }

    #[test]
    fn test_issue_number_from_issue_payload() {
        let payload = json!({ "issue": { "number": 7 } });
        assert_eq!(issue_number_from_payload(&payload), Some("7".to_string()));
    }

    #[test]
    fn test_issue_number_from_pull_request_payload() {
        let payload = json!({ "pull_request": { "number": 42 } });
        assert_eq!(issue_number_from_payload(&payload), Some("42".to_string()));
    }

    #[test]
    fn test_issue_number_from_top_level() {
        let payload = json!({ "number": 3, "action": "opened" });
        assert_eq!(issue_number_from_payload(&payload), Some("3".to_string()));
    }

    #[test]
    fn test_issue_number_absent() {
        let payload = json!({ "ref": "refs/heads/main" });
        assert_eq!(issue_number_from_payload(&payload), None);
    }
}
