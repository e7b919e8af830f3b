//! Link construction for the card's buttons.

use crate::context::RunContext;

/// The three links a status card points at.
#[derive(Debug, Clone)]
pub struct EventLinks {
    /// `https://github.com/{owner}/{repo}`
    pub repository: String,

    /// Repository link plus the event's target path.
    pub event: String,

    /// Event link plus `/checks`.
    pub checks: String,
}

impl EventLinks {
    /// Build the links from the run context and the event's target path.
    ///
    /// Owner and repo are used exactly as supplied; unset context fields
    /// arrive here as the literal `undefined` and stay that way.
    pub fn build(ctx: &RunContext, target_path: &str) -> Self {
        let repository = format!("https://github.com/{}/{}", ctx.owner, ctx.repo);
        let event = format!("{repository}{target_path}");
        let checks = format!("{event}/checks");
        Self {
            repository,
            event,
            checks,
        }
    }
}
