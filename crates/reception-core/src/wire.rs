//! Wire Types
//!
//! JSON bodies exchanged with `POST /ask-reception`.

use serde::{Deserialize, Serialize};

/// Path of the single backend endpoint
pub const ASK_ENDPOINT: &str = "/ask-reception";

/// Shown when a successful response carries no reply text
pub const NO_RESPONSE_TEXT: &str = "No response received from server.";

/// Request body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub user_query: String,
}

impl AskRequest {
    pub fn new(user_query: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
        }
    }
}

/// Response body. `response` is optional on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl AskResponse {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
        }
    }

    /// Lenient extraction from an arbitrary JSON body: a non-object body, a
    /// missing field, a non-string or an empty string all count as "no reply".
    pub fn from_value(value: &serde_json::Value) -> Self {
        let response = value
            .get("response")
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        Self { response }
    }

    /// Text to render as the bot message
    pub fn display_text(&self) -> &str {
        self.response.as_deref().unwrap_or(NO_RESPONSE_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_field_name() {
        let body = serde_json::to_value(AskRequest::new("Where is radiology?")).unwrap();
        assert_eq!(body, json!({"user_query": "Where is radiology?"}));
    }

    #[test]
    fn test_lenient_response_extraction() {
        assert_eq!(
            AskResponse::from_value(&json!({"response": "Floor 2"})).display_text(),
            "Floor 2"
        );
        for body in [json!({}), json!({"response": null}), json!({"response": 3}), json!([1]), json!({"response": ""})] {
            assert_eq!(AskResponse::from_value(&body).display_text(), NO_RESPONSE_TEXT);
        }
    }
}
