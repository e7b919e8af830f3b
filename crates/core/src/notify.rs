//! Webhook delivery and the notification dispatcher.
//!
//! [`ChatNotifier`] performs the single POST to the Google Chat incoming
//! webhook; [`send_notification`] runs the whole pipeline for one
//! invocation: classify, build links, assemble the card, deliver.

use tracing::debug;

use crate::card::{self, ChatMessage};
use crate::context::RunContext;
use crate::errors::NotificationError;
use crate::inputs::NotificationRequest;
use crate::links::EventLinks;
use crate::presentation::{EventPresentation, StatusPresentation};

/// Google Chat incoming-webhook notifier.
pub struct ChatNotifier {
    webhook_url: String,
    http: reqwest::Client,
}

impl ChatNotifier {
    /// Create a new notifier targeting the given webhook URL.
    pub fn new(webhook_url: String) -> Self {
        Self {
            webhook_url,
            http: reqwest::Client::new(),
        }
    }

    /// POST the message body to the webhook. One attempt, no retries.
    ///
    /// On failure the serialized body and any error-response payload are
    /// recorded at debug level for postmortem.
    pub async fn send(&self, message: &ChatMessage) -> Result<(), NotificationError> {
        let resp = match self.http.post(&self.webhook_url).json(message).send().await {
            Ok(resp) => resp,
            Err(e) => {
                debug!(body = %serialize_for_log(message), error = %e, "request failed");
                return Err(NotificationError::Http(e));
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!(
                body = %serialize_for_log(message),
                response = %body,
                "request failed"
            );
            return Err(NotificationError::Webhook {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = %status, "request success");
        Ok(())
    }
}

fn serialize_for_log(message: &ChatMessage) -> String {
    serde_json::to_string(message).unwrap_or_default()
}

/// Run the full notification pipeline for one invocation.
///
/// Derives the status and event presentation, builds the links, assembles
/// the card, and delivers it with a single POST. The outcome is terminal
/// either way; nothing is retried.
pub async fn send_notification(
    request: &NotificationRequest,
    ctx: &RunContext,
) -> Result<(), NotificationError> {
    let status = StatusPresentation::derive(&request.status);
    let event = EventPresentation::derive(ctx);
    let links = EventLinks::build(ctx, &event.target_path);

    debug!(
        name = %request.name,
        status = %status.label,
        event = %event.label,
        checks_url = %links.checks,
        "assembled notification card"
    );

    let message = card::build_message(request, ctx, &status, &event, &links);

    ChatNotifier::new(request.url.clone()).send(&message).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ChatMessage {
        let request = NotificationRequest {
            name: "Build".into(),
            url: "unused".into(),
            status: "success".into(),
            collapse: -1,
        };
        let ctx = RunContext {
            owner: "acme".into(),
            repo: "widgets".into(),
            event_name: Some("push".into()),
            ref_name: "refs/heads/main".into(),
            sha: "abc123".into(),
            actor: "octocat".into(),
            workflow: "CI".into(),
            issue_number: None,
        };
        let status = StatusPresentation::derive(&request.status);
        let event = EventPresentation::derive(&ctx);
        let links = EventLinks::build(&ctx, &event.target_path);
        card::build_message(&request, &ctx, &status, &event, &links)
    }

    #[test]
    fn test_notifier_construction() {
        let notifier = ChatNotifier::new("https://chat.example.com/hook".into());
        assert_eq!(notifier.webhook_url, "https://chat.example.com/hook");
    }

    #[tokio::test]
    async fn test_send_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let notifier = ChatNotifier::new(format!("{}/hook", server.url()));
        notifier.send(&message()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_non_success_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .with_status(400)
            .with_body("bad card")
            .create_async()
            .await;

        let notifier = ChatNotifier::new(format!("{}/hook", server.url()));
        let err = notifier.send(&message()).await.unwrap_err();
        assert!(
            matches!(err, NotificationError::Webhook { status: 400, ref body } if body == "bad card")
        );

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_transport_error() {
        // Nothing listens on port 1; the connection is refused.
        let notifier = ChatNotifier::new("http://127.0.0.1:1/hook".into());
        let err = notifier.send(&message()).await.unwrap_err();
        assert!(matches!(err, NotificationError::Http(_)));
    }
}
