//! Wire types for the upstream chat completion API.
//!
//! - `chat`: request/response bodies for the OpenAI-compatible
//!   `/chat/completions` endpoint exposed by Gemini.

// Author: kelexine (https://github.com/kelexine)

pub mod chat;

pub use chat::{ChatCompletionRequest, ChatCompletionResponse, CompletionText, ContentPart};
