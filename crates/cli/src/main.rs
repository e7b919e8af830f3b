//! gchat-notify action entry point.
//!
//! Reads the action inputs (long flags, or the `INPUT_*` environment
//! variables GitHub Actions exports), snapshots the run context, and
//! dispatches one Google Chat notification. Any failure surfaces as a
//! single `::error::` workflow command and a non-zero exit code.

mod workflow_commands;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gchatnotify_core::context::RunContext;
use gchatnotify_core::inputs::NotificationRequest;
use gchatnotify_core::notify::send_notification;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Post a CI status card to a Google Chat webhook.
#[derive(Parser, Debug)]
#[command(
    name = "gchat-notify",
    version,
    about = "Post a CI status card to a Google Chat webhook"
)]
struct Cli {
    /// Display name of the CI run; becomes the card title.
    #[arg(long, env = "INPUT_NAME")]
    name: Option<String>,

    /// Google Chat incoming-webhook URL.
    #[arg(long, env = "INPUT_URL")]
    url: Option<String>,

    /// Run status: success, failure, or anything else.
    #[arg(long, env = "INPUT_STATUS")]
    status: Option<String>,

    /// Number of card widgets kept visible before the section collapses.
    /// Omit (or pass a non-integer) to keep the section fully expanded.
    #[arg(long, env = "INPUT_COLLAPSE")]
    collapse: Option<String>,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            workflow_commands::set_failed(&format!(
                "error sending notification to google chat: {e:#}"
            ));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let request = NotificationRequest::new(cli.name, cli.url, cli.status, cli.collapse)
        .context("invalid action inputs")?;

    workflow_commands::debug(&format!(
        "input params: name={}, status={}, url={}",
        request.name, request.status, request.url
    ));

    let ctx = RunContext::from_env();
    debug!(
        owner = %ctx.owner,
        repo = %ctx.repo,
        event = ?ctx.event_name,
        sha = %ctx.sha,
        "run context"
    );

    send_notification(&request, &ctx).await?;

    workflow_commands::debug(&format!(
        "Sent notification: {}, {}",
        request.name, request.status
    ));
    Ok(())
}

fn init_tracing() {
    // RUNNER_DEBUG=1 is how Actions signals a debug re-run.
    let default = if std::env::var("RUNNER_DEBUG").as_deref() == Ok("1") {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
