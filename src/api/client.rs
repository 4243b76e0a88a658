/// HTTP client for the alignment service
///
/// One endpoint: POST the thermal/RGB pair as a multipart form and get
/// back either the aligned image (binary body) or a JSON error payload.

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Largest upload the service accepts per file (its MAX_CONTENT_LENGTH)
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// What the service said about a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignOutcome {
    /// 2xx with an image body: the aligned thermal image
    Aligned(Vec<u8>),
    /// Anything else, reduced to a user-facing message
    Rejected(String),
}

/// Failures that prevent a response from being classified at all
#[derive(Debug, Error)]
pub enum AlignError {
    /// A selected input could not be read before upload
    #[error("Failed to read {name}: {reason}")]
    Read { name: String, reason: String },

    /// A selected input is bigger than the service will accept
    #[error("{name} exceeds the 50 MB upload limit.")]
    TooLarge { name: String },

    /// The request never produced an HTTP response
    #[error("Network error. Please check your connection and try again.")]
    Network(#[from] reqwest::Error),
}

/// Error payload the service sends alongside non-image responses
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for one alignment endpoint
#[derive(Debug, Clone)]
pub struct AlignClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AlignClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        AlignClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload both inputs and classify the service's answer.
    ///
    /// The submit control stays disabled while this runs, so at most one
    /// request is ever in flight.
    pub async fn submit(&self, thermal: &Path, rgb: &Path) -> Result<AlignOutcome, AlignError> {
        let form = Form::new()
            .part("thermal", file_part(thermal).await?)
            .part("rgb", file_part(rgb).await?);

        println!("📤 Uploading image pair to {}", self.endpoint);

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;

        println!(
            "📬 Service answered {} ({})",
            status,
            content_type.as_deref().unwrap_or("no content type")
        );

        Ok(classify_response(status, content_type.as_deref(), &body))
    }
}

/// Read one input into a multipart part carrying its filename
///
/// The service rejects parts without a filename, and refuses bodies over
/// its size limit with an opaque 413, so both are checked here.
async fn file_part(path: &Path) -> Result<Part, AlignError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());

    let bytes = tokio::fs::read(path).await.map_err(|e| AlignError::Read {
        name: name.clone(),
        reason: e.to_string(),
    })?;

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AlignError::TooLarge { name });
    }

    Ok(Part::bytes(bytes).file_name(name))
}

/// Reduce an HTTP response to an outcome.
///
/// Pure function of (status, content type, body) so every branch can be
/// exercised without a live service:
/// - 2xx + image content type: aligned image body
/// - 2xx otherwise: JSON `error` field, or a generic format complaint
/// - non-2xx: JSON `error` field, or a generic status message
pub fn classify_response(
    status: StatusCode,
    content_type: Option<&str>,
    body: &[u8],
) -> AlignOutcome {
    if status.is_success() {
        if content_type.is_some_and(|ct| ct.contains("image")) {
            return AlignOutcome::Aligned(body.to_vec());
        }

        return match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody { error: Some(message) }) => AlignOutcome::Rejected(message),
            _ => AlignOutcome::Rejected("Unexpected response format.".to_string()),
        };
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { error: Some(message) }) => AlignOutcome::Rejected(message),
        Ok(ErrorBody { error: None }) => {
            AlignOutcome::Rejected(format!("Server error: {}", status.as_u16()))
        }
        Err(_) => AlignOutcome::Rejected(format!(
            "Server error: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_image_body_is_aligned() {
        let body = vec![0xFF, 0xD8, 0xFF, 0xE0];
        let outcome = classify_response(StatusCode::OK, Some("image/jpeg"), &body);
        assert_eq!(outcome, AlignOutcome::Aligned(body));
    }

    #[test]
    fn test_success_with_json_error_surfaces_it() {
        let body = br#"{"error": "Failed to encode output image"}"#;
        let outcome = classify_response(StatusCode::OK, Some("application/json"), body);
        assert_eq!(
            outcome,
            AlignOutcome::Rejected("Failed to encode output image".to_string())
        );
    }

    #[test]
    fn test_success_with_json_but_no_error_field() {
        let outcome = classify_response(StatusCode::OK, Some("application/json"), b"{}");
        assert_eq!(
            outcome,
            AlignOutcome::Rejected("Unexpected response format.".to_string())
        );
    }

    #[test]
    fn test_success_with_unparseable_body() {
        let outcome = classify_response(StatusCode::OK, Some("text/html"), b"<html>");
        assert_eq!(
            outcome,
            AlignOutcome::Rejected("Unexpected response format.".to_string())
        );
    }

    #[test]
    fn test_success_without_content_type_is_not_an_image() {
        let outcome = classify_response(StatusCode::OK, None, b"{}");
        assert_eq!(
            outcome,
            AlignOutcome::Rejected("Unexpected response format.".to_string())
        );
    }

    #[test]
    fn test_failure_with_json_error_shows_exact_text() {
        let body = br#"{"error": "Please upload both files (thermal and rgb)"}"#;
        let outcome = classify_response(StatusCode::BAD_REQUEST, Some("application/json"), body);
        assert_eq!(
            outcome,
            AlignOutcome::Rejected("Please upload both files (thermal and rgb)".to_string())
        );
    }

    #[test]
    fn test_failure_with_empty_json_falls_back_to_status() {
        let outcome =
            classify_response(StatusCode::INTERNAL_SERVER_ERROR, Some("application/json"), b"{}");
        assert_eq!(outcome, AlignOutcome::Rejected("Server error: 500".to_string()));
    }

    #[test]
    fn test_failure_with_non_json_body_includes_status_text() {
        let outcome = classify_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            Some("text/html"),
            b"<html>too big</html>",
        );
        assert_eq!(
            outcome,
            AlignOutcome::Rejected("Server error: 413 Payload Too Large".to_string())
        );
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        let read = AlignError::Read {
            name: "a_T.JPG".to_string(),
            reason: "permission denied".to_string(),
        };
        assert_eq!(read.to_string(), "Failed to read a_T.JPG: permission denied");

        let too_large = AlignError::TooLarge {
            name: "a_Z.JPG".to_string(),
        };
        assert_eq!(too_large.to_string(), "a_Z.JPG exceeds the 50 MB upload limit.");
    }
}
