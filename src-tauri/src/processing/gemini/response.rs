//! Turns a decoded `generateContent` response into an [`EditResult`].

use reqwest::StatusCode;
use tracing::warn;

use crate::core::{EditResult, EditedImage};
use crate::utils::{EditError, RESULT_MIME_TYPE, to_data_uri};

use super::types::{ErrorEnvelope, GenerateContentResponse};

pub const NO_CANDIDATES: &str = "No response candidates returned from Gemini.";
pub const NO_IMAGE: &str = "Model did not return an image.";

/// Classifies a response.
///
/// Only the first candidate is considered. Its parts are scanned in order:
/// the first non-empty inline-data part wins, otherwise the first non-empty
/// text part is a refusal, otherwise the response is a failure.
pub fn parse_edit_response(response: &GenerateContentResponse) -> EditResult {
    let Some(candidate) = response.candidates.first() else {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            warn!("Prompt blocked by the service: {}", reason);
        }
        return EditResult::Failure {
            reason: NO_CANDIDATES.to_string(),
        };
    };

    let parts = candidate
        .content
        .as_ref()
        .map(|content| content.parts.as_slice())
        .unwrap_or_default();

    let image = parts.iter().find_map(|part| {
        part.inline_data
            .as_ref()
            .and_then(|inline| inline.data.as_deref())
            .filter(|data| !data.is_empty())
    });
    if let Some(data) = image {
        return EditResult::Image {
            data: data.to_string(),
        };
    }

    let text = parts
        .iter()
        .find_map(|part| part.text.as_deref().filter(|text| !text.is_empty()));
    if let Some(explanation) = text {
        return EditResult::Refusal {
            explanation: explanation.to_string(),
        };
    }

    if let Some(reason) = candidate.finish_reason.as_deref() {
        warn!("Candidate finished without content: {}", reason);
    }
    EditResult::Failure {
        reason: NO_IMAGE.to_string(),
    }
}

impl EditResult {
    /// Maps the parsed result onto what the session consumes.
    ///
    /// Images are always framed as PNG, whatever the upload's type was.
    pub fn into_outcome(self) -> Result<EditedImage, EditError> {
        match self {
            EditResult::Image { data } => Ok(EditedImage {
                data_uri: to_data_uri(RESULT_MIME_TYPE, &data),
            }),
            EditResult::Refusal { explanation } => Err(EditError::Refusal(explanation)),
            EditResult::Failure { reason } => Err(EditError::NoImageReturned(reason)),
        }
    }
}

/// Builds the failure for a non-success HTTP response.
///
/// Prefers the service's own `error.message`; falls back to the status and raw body.
pub fn service_error(status: StatusCode, body: &str) -> EditError {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(message) = envelope.error.message.filter(|m| !m.trim().is_empty()) {
            return EditError::transport(message);
        }
        if let Some(kind) = envelope.error.status {
            let code = envelope.error.code.unwrap_or(status.as_u16());
            return EditError::transport(format!("Gemini API error {code}: {kind}"));
        }
    }

    let body = body.trim();
    if body.is_empty() {
        EditError::transport(format!("Gemini API error: {status}"))
    } else {
        EditError::transport(format!("Gemini API error {status}: {body}"))
    }
}
