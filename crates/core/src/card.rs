//! Google Chat cards-v2 message types and the card assembler.
//!
//! The wire schema is fixed: the serde definitions give every field its
//! exact cards-v2 name, and the assembler lays the widgets out in a fixed
//! order (Status, Repository, Event, Ref, Workflow, Actor). Consumers
//! depend on that exact placement.

use serde::Serialize;

use crate::context::RunContext;
use crate::inputs::NotificationRequest;
use crate::links::EventLinks;
use crate::presentation::{EventPresentation, StatusPresentation};

/// Base location of the versioned icon assets.
const ASSET_BASE: &str =
    "https://raw.githubusercontent.com/chriscase/gchat-notify/v2/assets";

/// Decorative header image (the Google Chat quickstart avatar).
const HEADER_IMAGE_URL: &str =
    "https://developers.google.com/chat/images/quickstart-app-avatar.png";

/// Card titles at least this long get truncated by the Chat UI, so the
/// full name is repeated in a wrapping widget at the end of the section.
const LONG_NAME_WIDGET_THRESHOLD: usize = 45;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Top-level webhook message body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub text: String,
    pub cards_v2: Vec<CardWithId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWithId {
    pub card_id: String,
    pub card: Card,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: String,
    pub header: CardHeader,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardHeader {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub image_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub collapsible: bool,
    pub uncollapsible_widgets_count: i64,
    pub widgets: Vec<Widget>,
}

/// The only widget shape this card uses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub decorated_text: DecoratedText,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_icon: Option<Icon>,
    pub top_label: String,
    pub text: String,
    pub wrap_text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<Button>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub icon_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub text: String,
    pub on_click: OnClick,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnClick {
    pub open_link: OpenLink,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenLink {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Assemble the full webhook message body for one invocation.
pub fn build_message(
    request: &NotificationRequest,
    ctx: &RunContext,
    status: &StatusPresentation,
    event: &EventPresentation,
    links: &EventLinks,
) -> ChatMessage {
    ChatMessage {
        text: String::new(),
        cards_v2: vec![CardWithId {
            card_id: request.name.clone(),
            card: build_card(request, ctx, status, event, links),
        }],
    }
}

fn build_card(
    request: &NotificationRequest,
    ctx: &RunContext,
    status: &StatusPresentation,
    event: &EventPresentation,
    links: &EventLinks,
) -> Card {
    let mut widgets = vec![
        row(
            status_icon(status),
            "Status",
            format!("<font color=\"{}\">{}</font>", status.color, status.label),
            Some(button("Open Checks", &links.checks)),
        ),
        row(
            icon("repo.png"),
            "Repository",
            format!("{}/{}", ctx.owner, ctx.repo),
            Some(button("Open Repository", &links.repository)),
        ),
        row(
            event_icon(event),
            "Event",
            event.label.to_string(),
            Some(button("Open Event", &links.event)),
        ),
        row(icon("ref.png"), "Ref", ctx.ref_name.clone(), None),
        row(icon("workflow.png"), "Workflow", ctx.workflow.clone(), None),
        row(icon("actor.png"), "Actor", ctx.actor.clone(), None),
    ];

    // The Chat UI truncates long header titles; repeat the full name in a
    // row that can wrap.
    if request.name.chars().count() >= LONG_NAME_WIDGET_THRESHOLD {
        widgets.push(Widget {
            decorated_text: DecoratedText {
                start_icon: None,
                top_label: "Name".into(),
                text: request.name.clone(),
                wrap_text: true,
                button: None,
            },
        });
    }

    Card {
        name: request.name.clone(),
        header: CardHeader {
            title: request.name.clone(),
            subtitle: format!("{}/{}", ctx.owner, ctx.repo),
            image_url: HEADER_IMAGE_URL.into(),
            image_type: "CIRCLE".into(),
        },
        sections: vec![Section {
            collapsible: request.collapse >= 0,
            uncollapsible_widgets_count: request.collapse,
            widgets,
        }],
    }
}

fn row(start_icon: Icon, label: &str, text: String, button: Option<Button>) -> Widget {
    Widget {
        decorated_text: DecoratedText {
            start_icon: Some(start_icon),
            top_label: label.into(),
            text,
            wrap_text: false,
            button,
        },
    }
}

fn button(text: &str, url: &str) -> Button {
    Button {
        text: text.into(),
        on_click: OnClick {
            open_link: OpenLink { url: url.into() },
        },
    }
}

fn icon(file: &str) -> Icon {
    Icon {
        icon_url: format!("{ASSET_BASE}/{file}"),
    }
}

fn status_icon(status: &StatusPresentation) -> Icon {
    icon(&format!("status_{}.png", status.kind.icon_key()))
}

fn event_icon(event: &EventPresentation) -> Icon {
    icon(&format!("event_{}.png", event.kind.key()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::NO_COLLAPSE;
    use serde_json::Value;

    fn request(name: &str, status: &str, collapse: i64) -> NotificationRequest {
        NotificationRequest {
            name: name.into(),
            url: "https://chat.example.com/hook".into(),
            status: status.into(),
            collapse,
        }
    }

    fn context() -> RunContext {
        RunContext {
            owner: "acme".into(),
            repo: "widgets".into(),
            event_name: Some("push".into()),
            ref_name: "refs/heads/main".into(),
            sha: "abc123".into(),
            actor: "octocat".into(),
            workflow: "CI".into(),
            issue_number: None,
        }
    }

    fn assemble(req: &NotificationRequest, ctx: &RunContext) -> Value {
        let status = StatusPresentation::derive(&req.status);
        let event = EventPresentation::derive(ctx);
        let links = EventLinks::build(ctx, &event.target_path);
        serde_json::to_value(build_message(req, ctx, &status, &event, &links)).unwrap()
    }

    #[test]
    fn test_body_shape_and_header() {
        let body = assemble(&request("Build", "Success", NO_COLLAPSE), &context());

        assert_eq!(body["text"], "");
        assert_eq!(body["cardsV2"][0]["cardId"], "Build");

        let card = &body["cardsV2"][0]["card"];
        assert_eq!(card["name"], "Build");
        assert_eq!(card["header"]["title"], "Build");
        assert_eq!(card["header"]["subtitle"], "acme/widgets");
        assert_eq!(card["header"]["imageType"], "CIRCLE");
    }

    #[test]
    fn test_widget_order_and_buttons() {
        let body = assemble(&request("Build", "Success", NO_COLLAPSE), &context());
        let widgets = body["cardsV2"][0]["card"]["sections"][0]["widgets"]
            .as_array()
            .unwrap();
        assert_eq!(widgets.len(), 6);

        let labels: Vec<&str> = widgets
            .iter()
            .map(|w| w["decoratedText"]["topLabel"].as_str().unwrap())
            .collect();
        assert_eq!(
            labels,
            ["Status", "Repository", "Event", "Ref", "Workflow", "Actor"]
        );

        let status = &widgets[0]["decoratedText"];
        assert_eq!(
            status["text"],
            "<font color=\"#2cbe4e\">Success</font>"
        );
        assert_eq!(
            status["button"]["onClick"]["openLink"]["url"],
            "https://github.com/acme/widgets/commit/abc123/checks"
        );
        assert!(status["startIcon"]["iconUrl"]
            .as_str()
            .unwrap()
            .ends_with("status_success.png"));

        assert_eq!(
            widgets[1]["decoratedText"]["button"]["onClick"]["openLink"]["url"],
            "https://github.com/acme/widgets"
        );
        assert_eq!(widgets[2]["decoratedText"]["text"], "Push");
        assert_eq!(
            widgets[2]["decoratedText"]["button"]["onClick"]["openLink"]["url"],
            "https://github.com/acme/widgets/commit/abc123"
        );

        // Ref, Workflow, and Actor rows carry no button.
        for w in &widgets[3..] {
            assert!(w["decoratedText"].get("button").is_none());
        }
    }

    #[test]
    fn test_long_name_widget_boundary() {
        let short = "a".repeat(44);
        let body = assemble(&request(&short, "success", NO_COLLAPSE), &context());
        let widgets = body["cardsV2"][0]["card"]["sections"][0]["widgets"]
            .as_array()
            .unwrap();
        assert_eq!(widgets.len(), 6);

        let long = "a".repeat(45);
        let body = assemble(&request(&long, "success", NO_COLLAPSE), &context());
        let widgets = body["cardsV2"][0]["card"]["sections"][0]["widgets"]
            .as_array()
            .unwrap();
        assert_eq!(widgets.len(), 7);

        let name_row = &widgets[6]["decoratedText"];
        assert_eq!(name_row["topLabel"], "Name");
        assert_eq!(name_row["text"], long);
        assert_eq!(name_row["wrapText"], true);
        assert!(name_row.get("startIcon").is_none());
        assert!(name_row.get("button").is_none());
    }

    #[test]
    fn test_section_not_collapsible_by_default() {
        let body = assemble(&request("Build", "success", NO_COLLAPSE), &context());
        let section = &body["cardsV2"][0]["card"]["sections"][0];
        assert_eq!(section["collapsible"], false);
        assert_eq!(section["uncollapsibleWidgetsCount"], -1);
    }

    #[test]
    fn test_section_collapsible_at_zero_threshold() {
        let body = assemble(&request("Build", "success", 0), &context());
        let section = &body["cardsV2"][0]["card"]["sections"][0];
        assert_eq!(section["collapsible"], true);
        assert_eq!(section["uncollapsibleWidgetsCount"], 0);
    }

    #[test]
    fn test_section_threshold_above_widget_count_is_inert() {
        let body = assemble(&request("Build", "success", 99), &context());
        let section = &body["cardsV2"][0]["card"]["sections"][0];
        assert_eq!(section["collapsible"], true);
        assert_eq!(section["uncollapsibleWidgetsCount"], 99);
    }

    #[test]
    fn test_cancelled_style_status_widget() {
        let body = assemble(&request("Build", "cancelled", NO_COLLAPSE), &context());
        let status = &body["cardsV2"][0]["card"]["sections"][0]["widgets"][0]["decoratedText"];
        assert_eq!(status["text"], "<font color=\"#ffc107\">Cancelled</font>");
        assert!(status["startIcon"]["iconUrl"]
            .as_str()
            .unwrap()
            .ends_with("status_cancelled.png"));
    }
}
