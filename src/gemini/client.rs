// Gemini text extraction client
// Author: kelexine (https://github.com/kelexine)

use super::ApiKey;
use crate::config::GeminiConfig;
use crate::error::{ExtractError, Result};
use crate::models::chat::{ChatCompletionRequest, ChatCompletionResponse, CompletionText};
use crate::utils::logging::{abbreviate_data_uris, sanitize};
use crate::vision::ImagePayload;
use reqwest::Client;
use std::path::Path;
use tracing::{debug, error, info, info_span, Instrument};

/// Client for Gemini's OpenAI-compatible chat completion endpoint.
///
/// Built once from a [`GeminiConfig`]; the credential is a field of the
/// client and never touches process-wide state. Each call to
/// [`extract`](Self::extract) reads one image and performs one request.
pub struct ExtractionClient {
    http_client: Client,
    config: GeminiConfig,
    api_key: Option<ApiKey>,
}

impl ExtractionClient {
    /// Create a client, taking the key from the config or `GEMINI_API_KEY`.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config.resolve_api_key_from_env().map(ApiKey::new);
        Self::with_api_key(config, api_key)
    }

    /// Create a client with an explicit credential, ignoring the environment.
    pub fn with_api_key(config: &GeminiConfig, api_key: Option<ApiKey>) -> Result<Self> {
        let mut builder = Client::builder().use_rustls_tls();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| ExtractError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Created extraction client for model {} at {}",
            config.model, config.api_base_url
        );

        Ok(Self {
            http_client,
            config: config.clone(),
            api_key,
        })
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Replace the credential used by this and all later calls on the client.
    pub fn set_api_key(&mut self, api_key: ApiKey) {
        self.api_key = Some(api_key);
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Full URL of the chat completion endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base_url.trim_end_matches('/')
        )
    }

    /// Assemble the single-turn request for an encoded image.
    pub fn build_request(&self, payload: &ImagePayload) -> ChatCompletionRequest {
        ChatCompletionRequest::single_image(&self.config.model, &self.config.prompt, payload.data_uri())
    }

    /// Like [`extract`](Self::extract), but first stores `api_key` (if given
    /// and not blank) on the client so later calls reuse it.
    pub async fn extract_with_key(&mut self, path: &Path, api_key: Option<&str>) -> Result<String> {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.set_api_key(ApiKey::new(key));
        }
        self.extract(path).await
    }

    /// Extract all text from the image at `path`.
    ///
    /// The file is read before any network activity, so a missing file
    /// fails with [`ExtractError::FileNotFound`] without sending a request.
    pub async fn extract(&self, path: &Path) -> Result<String> {
        let request_id = uuid::Uuid::new_v4().simple().to_string();
        let span = info_span!("extract", request_id = %request_id, path = %path.display());

        self.extract_inner(path).instrument(span).await
    }

    async fn extract_inner(&self, path: &Path) -> Result<String> {
        let payload = ImagePayload::load(path)?;
        debug!("Encoded image as {} ({} base64 chars)", payload.format, payload.data.len());

        let request = self.build_request(&payload);
        let text = self.send(&request).await?;

        info!("Extracted {} chars of text", text.chars().count());
        Ok(text)
    }

    /// POST a completion request and return the first choice's text.
    pub async fn send(&self, request: &ChatCompletionRequest) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or(ExtractError::MissingApiKey)?;
        let url = self.endpoint();

        if tracing::enabled!(tracing::Level::DEBUG) {
            let body = serde_json::to_string(request).unwrap_or_default();
            debug!("POST {} {}", url, abbreviate_data_uris(&body));
        }

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!(
                "Gemini API error: HTTP {} - Response body: {}",
                status,
                sanitize(&response_text)
            );
            let message = Self::extract_error_message(&response_text)
                .unwrap_or_else(|| response_text.clone());
            return Err(ExtractError::from_status(status.as_u16(), message));
        }

        debug!(
            "Raw response (first 500 chars): {}",
            sanitize(&response_text.chars().take(500).collect::<String>())
        );

        let completion: ChatCompletionResponse = serde_json::from_str(&response_text)
            .map_err(|e| ExtractError::MalformedResponse(format!("Response parsing error: {}", e)))?;

        match completion.into_first_text() {
            CompletionText::Text(text) => Ok(text),
            CompletionText::NoChoices => Err(ExtractError::NoChoices),
            CompletionText::Missing => Err(ExtractError::MalformedResponse(
                "first choice has no text content".to_string(),
            )),
        }
    }

    /// Extract error message from API response JSON.
    ///
    /// Accepts both `{"error": {...}}` and the `[{"error": {...}}]` list form.
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum ErrorBody {
            Single(ErrorResponse),
            List(Vec<ErrorResponse>),
        }

        let first = match serde_json::from_str::<ErrorBody>(response_text).ok()? {
            ErrorBody::Single(resp) => resp,
            ErrorBody::List(list) => list.into_iter().next()?,
        };
        let error = first.error?;
        error.message.or(error.status)
    }
}
