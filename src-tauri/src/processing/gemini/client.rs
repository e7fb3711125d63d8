//! HTTP client for the Gemini image edit call.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::core::{AppConfig, EditedImage};
use crate::utils::{EditError, strip_data_uri_prefix};

use super::response::{parse_edit_response, service_error};
use super::types::{
    GenerateContentRequest, GenerateContentResponse, InlineData, RequestContent, RequestPart,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that can turn an image plus an instruction into an edited image.
///
/// The session only talks to this trait so tests can substitute a scripted editor.
#[async_trait]
pub trait ImageEditor: Send + Sync {
    /// Performs exactly one remote edit. No retries.
    async fn submit_edit(
        &self,
        encoded_image: &str,
        mime_type: &str,
        prompt: &str,
    ) -> Result<EditedImage, EditError>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    config: AppConfig,
}

impl GeminiClient {
    pub fn new(config: AppConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Uses a preconfigured HTTP client, e.g. one without system proxies.
    pub fn with_http_client(config: AppConfig, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    /// `{api_base}/models/{model}:generateContent`
    pub fn endpoint(&self) -> String {
        let model = self.config.model.trim_start_matches("models/");
        format!("{}/models/{}:generateContent", self.config.api_base, model)
    }

    /// One user turn: the image first, then the instruction.
    pub fn build_request(encoded_image: &str, mime_type: &str, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: strip_data_uri_prefix(encoded_image).to_string(),
                        },
                    },
                    RequestPart::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
        }
    }
}

#[async_trait]
impl ImageEditor for GeminiClient {
    async fn submit_edit(
        &self,
        encoded_image: &str,
        mime_type: &str,
        prompt: &str,
    ) -> Result<EditedImage, EditError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(EditError::MissingCredential)?;

        let body = Self::build_request(encoded_image, mime_type, prompt);
        let url = self.endpoint();
        debug!("Sending edit to {} ({}, prompt {:?})", url, mime_type, prompt);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .timeout(self.config.request_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Edit request failed: {}", e);
                EditError::transport(e.to_string())
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!("Failed to read edit response: {}", e);
            EditError::transport(e.to_string())
        })?;

        if !status.is_success() {
            warn!("Gemini returned {}", status);
            return Err(service_error(status, &text));
        }

        let decoded: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            warn!("Unreadable edit response: {}", e);
            EditError::transport(format!("Invalid response from Gemini: {e}"))
        })?;

        debug!("Received {} candidate(s)", decoded.candidates.len());
        parse_edit_response(&decoded).into_outcome()
    }
}
