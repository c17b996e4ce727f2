// OpenAI-compatible chat completion types
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Chat completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Target model identifier (e.g., "gemini-1.5-flash").
    pub model: String,

    /// Conversation turns; extraction always sends exactly one.
    pub messages: Vec<ChatMessage>,
}

/// A single conversational turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

/// Ordered content block inside a message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ChatCompletionRequest {
    /// Build the single-turn request: instruction text first, then the image.
    pub fn single_image(model: &str, prompt: &str, data_uri: String) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_uri },
                    },
                ],
            }],
        }
    }
}

/// Chat completion response body.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

/// Message content is either a plain string or a list of typed parts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ResponseContent {
    Text(String),
    Parts(Vec<ResponsePart>),
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Outcome of reading a well-formed completion response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionText {
    /// First choice carried text content.
    Text(String),
    /// `choices` was present but empty.
    NoChoices,
    /// First choice had no usable text (null content or no text parts).
    Missing,
}

impl ChatCompletionResponse {
    /// Take the text of the first choice.
    pub fn into_first_text(self) -> CompletionText {
        let Some(choice) = self.choices.into_iter().next() else {
            return CompletionText::NoChoices;
        };

        match choice.message.content {
            Some(ResponseContent::Text(text)) => CompletionText::Text(text),
            Some(ResponseContent::Parts(parts)) => {
                let texts: Vec<String> = parts
                    .into_iter()
                    .filter(|p| p.kind == "text" || p.kind == "output_text")
                    .filter_map(|p| p.text)
                    .collect();
                if texts.is_empty() {
                    CompletionText::Missing
                } else {
                    CompletionText::Text(texts.concat())
                }
            }
            None => CompletionText::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_image_request_format() {
        let request = ChatCompletionRequest::single_image(
            "gemini-1.5-flash",
            "Read this",
            "data:image/png;base64,AAAA".to_string(),
        );
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "gemini-1.5-flash",
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "text": "Read this"},
                        {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_string_content() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "HELLO"}, "finish_reason": "stop"}]
        }))
        .unwrap();
        assert_eq!(response.into_first_text(), CompletionText::Text("HELLO".to_string()));
    }

    #[test]
    fn test_extra_response_fields_are_ignored() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-2",
            "object": "chat.completion",
            "created": 1700000000,
            "usage": {"prompt_tokens": 258, "completion_tokens": 3},
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "OK", "refusal": null},
                "finish_reason": "stop",
                "logprobs": null
            }]
        }))
        .unwrap();
        assert_eq!(response.into_first_text(), CompletionText::Text("OK".to_string()));
    }

    #[test]
    fn test_parts_content() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": [
                {"type": "text", "text": "Line 1\n"},
                {"type": "refusal"},
                {"type": "text", "text": "Line 2"}
            ]}}]
        }))
        .unwrap();
        assert_eq!(
            response.into_first_text(),
            CompletionText::Text("Line 1\nLine 2".to_string())
        );
    }

    #[test]
    fn test_only_first_choice_is_used() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"content": "first"}},
                {"message": {"content": "second"}}
            ]
        }))
        .unwrap();
        assert_eq!(response.into_first_text(), CompletionText::Text("first".to_string()));
    }

    #[test]
    fn test_empty_choices() {
        let response: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(response.into_first_text(), CompletionText::NoChoices);
    }

    #[test]
    fn test_null_content() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert_eq!(response.into_first_text(), CompletionText::Missing);
    }

    #[test]
    fn test_missing_choices_is_parse_error() {
        let result = serde_json::from_value::<ChatCompletionResponse>(json!({"id": "x"}));
        assert!(result.is_err());
    }
}
