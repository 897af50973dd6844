use serde::{Deserialize, Deserializer, Serialize};

use crate::models::nav::Route;

/// Thumbs rating a user left on an assistant message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Rating {
    Positive,
    Negative,
    Unset,
}

impl From<Option<bool>> for Rating {
    fn from(thumbup: Option<bool>) -> Self {
        match thumbup {
            Some(true) => Rating::Positive,
            Some(false) => Rating::Negative,
            None => Rating::Unset,
        }
    }
}

impl From<Rating> for Option<bool> {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::Positive => Some(true),
            Rating::Negative => Some(false),
            Rating::Unset => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    /// Interactive chat in the web client.
    Regular,
    /// Conversation created through the public API.
    Api,
}

/// One feedback record as the chat service reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub conversation_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub conversation_name: String,
    pub message_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_question: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assistant_content: String,
    #[serde(rename = "thumbup", default = "unset")]
    pub rating: Rating,
    #[serde(rename = "feedback", default, deserialize_with = "null_as_empty")]
    pub feedback_text: String,
    #[serde(rename = "timestamp", deserialize_with = "whole_seconds")]
    pub timestamp_seconds: i64,
    #[serde(rename = "conversation_type")]
    pub kind: ConversationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl FeedbackItem {
    /// Where "View" leads for this row; `None` when the conversation kind
    /// has no viewer.
    pub fn conversation_route(&self) -> Option<Route> {
        match self.kind {
            ConversationKind::Regular => Some(Route::Chat {
                conversation_id: self.conversation_id.clone(),
                dialog_id: self.dialog_id.clone(),
            }),
            ConversationKind::Api => None,
        }
    }
}

/// One page of results. Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub items: Vec<FeedbackItem>,
}

impl FeedbackPage {
    pub fn empty(page_size: u32) -> Self {
        Self { total: 0, page: 1, page_size, items: Vec::new() }
    }
}

fn unset() -> Rating {
    Rating::Unset
}

fn first_page() -> u32 {
    1
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn whole_seconds<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let secs = f64::deserialize(d)?;
    Ok(secs.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_server_field_names() {
        let item: FeedbackItem = serde_json::from_value(json!({
            "conversation_id": "c1",
            "conversation_name": "Onboarding",
            "message_id": "m1",
            "user_question": "How?",
            "assistant_content": "Like this.",
            "thumbup": false,
            "feedback": "too vague",
            "timestamp": 1718000000,
            "conversation_type": "regular",
            "dialog_id": "d1"
        }))
        .unwrap();
        assert_eq!(item.rating, Rating::Negative);
        assert_eq!(item.feedback_text, "too vague");
        assert_eq!(item.kind, ConversationKind::Regular);
        assert_eq!(item.dialog_id.as_deref(), Some("d1"));
        assert_eq!(item.user_id, None);
    }

    #[test]
    fn tolerates_nulls_and_fractional_timestamps() {
        let item: FeedbackItem = serde_json::from_value(json!({
            "conversation_id": "c1",
            "conversation_name": null,
            "message_id": "m1",
            "user_question": "q",
            "assistant_content": null,
            "thumbup": null,
            "feedback": null,
            "timestamp": 1718000000.75,
            "conversation_type": "api"
        }))
        .unwrap();
        assert_eq!(item.rating, Rating::Unset);
        assert_eq!(item.conversation_name, "");
        assert_eq!(item.feedback_text, "");
        assert_eq!(item.timestamp_seconds, 1718000000);
    }

    #[test]
    fn view_route_depends_on_kind() {
        let mut item: FeedbackItem = serde_json::from_value(json!({
            "conversation_id": "c1", "message_id": "m1", "thumbup": true,
            "timestamp": 0, "conversation_type": "api"
        }))
        .unwrap();
        assert_eq!(item.conversation_route(), None);

        item.kind = ConversationKind::Regular;
        item.dialog_id = Some("d1".into());
        let route = item.conversation_route().unwrap();
        assert_eq!(route.to_path(), "/chat?conversation_id=c1&dialog_id=d1");
    }
}
