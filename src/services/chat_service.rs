use std::fmt;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::models::feedback::{FeedbackPage, ListFeedbackParams};
use crate::models::user::UserProfile;

const FEEDBACK_PATH: &str = "v1/conversation/feedback";
const USER_INFO_PATH: &str = "v1/user/info";

/// Why a call to the chat service produced no usable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Transport(String),
    Status(u16),
    Api { code: i64, message: String },
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "{e}"),
            FetchError::Status(code) => write!(f, "Chat service responded with HTTP {code}"),
            FetchError::Api { message, .. } => write!(f, "{message}"),
            FetchError::Decode(e) => write!(f, "Unreadable chat service response: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Response wrapper the chat service puts around every payload.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Non-zero codes are errors; a missing payload is `Ok(None)`.
    pub fn into_data(self) -> Result<Option<T>, FetchError> {
        if self.code != 0 {
            return Err(FetchError::Api {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }
        Ok(self.data)
    }
}

/// The slice of the chat service the console consumes.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// One page of feedback. `Ok(None)` when the service sent no payload.
    async fn list_feedback(&self, params: &ListFeedbackParams) -> Result<Option<FeedbackPage>, FetchError>;

    async fn user_info(&self) -> Result<UserProfile, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ChatServiceConfig {
    pub base_url: Url,
    pub token: Option<String>,
}

/// `reqwest` implementation of [`ChatService`].
#[derive(Debug, Clone)]
pub struct ChatServiceClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ChatServiceClient {
    pub fn new(config: ChatServiceConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(token)
                .map_err(|e| FetchError::Transport(format!("invalid service token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self { client, base_url: with_trailing_slash(config.base_url) })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::Transport(format!("bad endpoint {path}: {e}")))
    }

    async fn get_json<T: DeserializeOwned, Q: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Option<T>, FetchError> {
        let url = self.endpoint(path)?;
        log::debug!("GET {url}");
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Chat service {path} returned {status}");
            return Err(FetchError::Status(status.as_u16()));
        }
        let envelope: Envelope<T> = response.json().await?;
        envelope.into_data()
    }
}

#[async_trait]
impl ChatService for ChatServiceClient {
    async fn list_feedback(&self, params: &ListFeedbackParams) -> Result<Option<FeedbackPage>, FetchError> {
        self.get_json(FEEDBACK_PATH, params).await
    }

    async fn user_info(&self) -> Result<UserProfile, FetchError> {
        let no_query: [(&str, &str); 0] = [];
        let profile: Option<UserProfile> = self.get_json(USER_INFO_PATH, &no_query).await?;
        Ok(profile.unwrap_or_default())
    }
}

/// `Url::join` drops the last segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_without_data_is_empty_not_error() {
        let env: Envelope<FeedbackPage> = serde_json::from_value(json!({ "code": 0, "message": "ok" })).unwrap();
        assert_eq!(env.into_data(), Ok(None));

        let env: Envelope<FeedbackPage> = serde_json::from_value(json!({ "code": 0, "data": null })).unwrap();
        assert_eq!(env.into_data(), Ok(None));
    }

    #[test]
    fn envelope_error_code_carries_message() {
        let env: Envelope<FeedbackPage> =
            serde_json::from_value(json!({ "code": 401, "message": "Unauthorized", "data": null })).unwrap();
        let err = env.into_data().unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[test]
    fn envelope_decodes_page() {
        let env: Envelope<FeedbackPage> = serde_json::from_value(json!({
            "code": 0,
            "data": { "total": 1, "page": 1, "page_size": 20, "items": [{
                "conversation_id": "c1", "conversation_name": "n", "message_id": "m1",
                "user_question": "q", "assistant_content": "a", "thumbup": true,
                "feedback": "", "timestamp": 1718000000, "conversation_type": "regular",
                "dialog_id": "d1", "user_id": "u1"
            }]}
        }))
        .unwrap();
        let page = env.into_data().unwrap().unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].message_id, "m1");
    }

    #[test]
    fn endpoints_keep_base_path() {
        let client = ChatServiceClient::new(ChatServiceConfig {
            base_url: Url::parse("http://chat.internal/api").unwrap(),
            token: None,
        })
        .unwrap();
        assert_eq!(
            client.endpoint(FEEDBACK_PATH).unwrap().as_str(),
            "http://chat.internal/api/v1/conversation/feedback"
        );
    }
}
