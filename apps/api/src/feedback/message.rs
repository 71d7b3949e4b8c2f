use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

const BLANK: &str = "—";

/// Incoming feedback body, tagged by `type`. Bodies from the legacy review pages use a
/// capitalized `Type` key and capitalized (partly French) field names; both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum FeedbackPayload {
    /// Thumbnail request from the landing form.
    #[serde(rename = "request", alias = "Request")]
    Request(ThumbnailRequest),
    /// Comment left on a client preview page.
    #[serde(rename = "preview_feedback", alias = "PreviewFeedback")]
    PreviewFeedback(PreviewFeedback),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRequest {
    #[serde(alias = "Identité")]
    pub identity: Option<String>,
    #[serde(alias = "Contact")]
    pub contact: Option<String>,
    #[serde(alias = "Titre")]
    pub title: Option<String>,
    #[serde(alias = "Brief")]
    pub brief: Option<String>,
    #[serde(alias = "Liens")]
    pub links: Option<String>,
    #[serde(alias = "Deadline")]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewFeedback {
    #[serde(alias = "projectRef", alias = "Slug")]
    pub slug: Option<String>,
    #[serde(alias = "Name")]
    pub name: Option<String>,
    #[serde(alias = "Comment")]
    pub comment: Option<String>,
    #[serde(alias = "RefImage")]
    pub reference_image_url: Option<String>,
}

/// Chat webhook body. `embeds` is omitted when there is no reference image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub image: EmbedImage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn or_blank(field: &Option<String>) -> &str {
    present(field).unwrap_or(BLANK)
}

impl FeedbackPayload {
    /// Parses and validates a raw body. Unknown `type` values and missing required text
    /// are payload errors.
    pub fn from_json(mut body: Value) -> Result<Self, AppError> {
        if let Some(fields) = body.as_object_mut() {
            if !fields.contains_key("type") {
                if let Some(tag) = fields.remove("Type") {
                    fields.insert("type".to_string(), tag);
                }
            }
        }

        let payload: FeedbackPayload = serde_json::from_value(body)
            .map_err(|e| AppError::InvalidPayload(format!("Unknown or malformed payload: {e}")))?;
        payload.validate()?;
        Ok(payload)
    }

    fn validate(&self) -> Result<(), AppError> {
        match self {
            FeedbackPayload::Request(req) => {
                if present(&req.identity).is_none() || present(&req.brief).is_none() {
                    return Err(AppError::InvalidPayload(
                        "identity and brief are required".into(),
                    ));
                }
            }
            FeedbackPayload::PreviewFeedback(fb) => {
                if present(&fb.comment).is_none() {
                    return Err(AppError::InvalidPayload("comment is required".into()));
                }
            }
        }
        Ok(())
    }

    /// Formats the human-readable notification.
    pub fn to_message(&self, now: DateTime<Utc>, user_agent: &str) -> WebhookMessage {
        let when = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        match self {
            FeedbackPayload::Request(req) => WebhookMessage {
                content: [
                    "**NEW THUMBNAIL REQUEST**".to_string(),
                    format!("• Identity: {}", or_blank(&req.identity)),
                    format!("• Contact: {}", or_blank(&req.contact)),
                    format!("• Title/Topic: {}", or_blank(&req.title)),
                    format!("• Brief: {}", or_blank(&req.brief)),
                    format!("• Links: {}", or_blank(&req.links)),
                    format!("• Deadline: {}", or_blank(&req.deadline)),
                    format!("• When: {when}"),
                    format!("• UA: {user_agent}"),
                ]
                .join("\n"),
                embeds: Vec::new(),
            },
            FeedbackPayload::PreviewFeedback(fb) => {
                let embeds = present(&fb.reference_image_url)
                    .map(|url| Embed {
                        title: "Reference".to_string(),
                        image: EmbedImage {
                            url: url.to_string(),
                        },
                    })
                    .into_iter()
                    .collect();
                WebhookMessage {
                    content: [
                        "**NEW PREVIEW FEEDBACK**".to_string(),
                        format!("• Client folder: {}", or_blank(&fb.slug)),
                        format!("• Name: {}", or_blank(&fb.name)),
                        format!("• Comment: {}", or_blank(&fb.comment)),
                        format!("• Reference image: {}", or_blank(&fb.reference_image_url)),
                        format!("• When: {when}"),
                        format!("• UA: {user_agent}"),
                    ]
                    .join("\n"),
                    embeds,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_preview_feedback_message() {
        let payload = FeedbackPayload::from_json(json!({
            "type": "preview_feedback",
            "slug": "acme",
            "comment": "Brighter text please",
            "referenceImageUrl": "/clients/acme/02.png"
        }))
        .unwrap();
        let msg = payload.to_message(fixed_now(), "curl/8.0");
        assert_eq!(
            msg.content,
            "**NEW PREVIEW FEEDBACK**\n\
             • Client folder: acme\n\
             • Name: —\n\
             • Comment: Brighter text please\n\
             • Reference image: /clients/acme/02.png\n\
             • When: 2026-03-14T09:26:53.000Z\n\
             • UA: curl/8.0"
        );
        assert_eq!(msg.embeds.len(), 1);
        assert_eq!(msg.embeds[0].image.url, "/clients/acme/02.png");
    }

    #[test]
    fn test_request_message_has_no_embeds() {
        let payload = FeedbackPayload::from_json(json!({
            "type": "Request",
            "identity": "Jo",
            "brief": "Gaming video, red tones"
        }))
        .unwrap();
        let msg = payload.to_message(fixed_now(), "");
        assert!(msg.content.starts_with("**NEW THUMBNAIL REQUEST**\n• Identity: Jo\n"));
        assert!(msg.content.contains("• Deadline: —"));
        let body = serde_json::to_value(&msg).unwrap();
        assert!(body.get("embeds").is_none());
    }

    #[test]
    fn test_project_ref_alias() {
        let payload = FeedbackPayload::from_json(json!({
            "type": "PreviewFeedback",
            "projectRef": "abc123def456",
            "comment": "ok"
        }))
        .unwrap();
        match payload {
            FeedbackPayload::PreviewFeedback(fb) => {
                assert_eq!(fb.slug.as_deref(), Some("abc123def456"))
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_is_invalid() {
        let err = FeedbackPayload::from_json(json!({"type": "Spam", "comment": "x"})).unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[test]
    fn test_blank_comment_is_invalid() {
        let err = FeedbackPayload::from_json(json!({
            "type": "preview_feedback",
            "comment": "   "
        }))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[test]
    fn test_request_requires_brief() {
        let err = FeedbackPayload::from_json(json!({"type": "request", "identity": "Jo"}))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[test]
    fn test_legacy_preview_page_body() {
        let payload = FeedbackPayload::from_json(json!({
            "Type": "PreviewFeedback",
            "Slug": "acme",
            "Name": "Jo",
            "Comment": "Brighter",
            "RefImage": "/clients/acme/01.png"
        }))
        .unwrap();
        let msg = payload.to_message(fixed_now(), "");
        assert!(msg.content.contains("• Client folder: acme\n• Name: Jo\n• Comment: Brighter"));
        assert_eq!(msg.embeds[0].image.url, "/clients/acme/01.png");
    }

    #[test]
    fn test_legacy_preview_page_body_without_reference() {
        let payload = FeedbackPayload::from_json(json!({
            "Type": "PreviewFeedback",
            "Slug": "acme",
            "Name": "",
            "Comment": "Looks good",
            "RefImage": ""
        }))
        .unwrap();
        let msg = payload.to_message(fixed_now(), "");
        assert!(msg.content.contains("• Reference image: —"));
        assert!(msg.embeds.is_empty());
    }

    #[test]
    fn test_legacy_request_form_body() {
        let payload = FeedbackPayload::from_json(json!({
            "Type": "Request",
            "Identité": "Jo",
            "Contact": "jo@example.com",
            "Titre": "Speedrun",
            "Brief": "Red tones",
            "Liens": "https://youtu.be/x",
            "Deadline": "Friday"
        }))
        .unwrap();
        let msg = payload.to_message(fixed_now(), "");
        assert!(msg.content.contains("• Identity: Jo\n• Contact: jo@example.com\n• Title/Topic: Speedrun"));
        assert!(msg.content.contains("• Links: https://youtu.be/x\n• Deadline: Friday"));
    }
}
