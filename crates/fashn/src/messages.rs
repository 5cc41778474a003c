//! Typed wire contract for the garment-swap generation service.
//!
//! Two endpoints are used:
//!
//! - `POST /run` with a [`RunRequest`] body, answered by a [`RunResponse`].
//! - `GET /status/{id}`, answered by a [`StatusResponse`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Seed sent with every capture-based request so repeated try-ons of the
/// same photo and garment are reproducible.
pub const DEFAULT_SEED: u64 = 42;

/// Server-assigned identifier of a generation job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Garment category hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Auto,
    Tops,
    Bottoms,
    OnePieces,
}

/// Speed/quality trade-off of the generation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Performance,
    Balanced,
    Quality,
}

/// Body of `POST /run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRequest {
    /// Photo of the person: a base64 data URI or a URL.
    pub model_image: String,
    /// URL of the garment to composite onto the photo.
    pub garment_image: String,
    pub category: Category,
    pub mode: Mode,
    pub num_samples: u32,
    pub seed: u64,
}

impl RunRequest {
    /// Request for a freshly captured photo: auto category, performance
    /// mode, one sample, fixed seed.
    pub fn for_capture(model_image: impl Into<String>, garment_image: impl Into<String>) -> Self {
        Self {
            model_image: model_image.into(),
            garment_image: garment_image.into(),
            category: Category::Auto,
            mode: Mode::Performance,
            num_samples: 1,
            seed: DEFAULT_SEED,
        }
    }
}

/// Response of `POST /run`.
///
/// A present `error` means the submission was rejected, whatever the
/// HTTP status code said.
#[derive(Debug, Clone, Deserialize)]
pub struct RunResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Remote job status as reported by `GET /status/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteStatus {
    Starting,
    InQueue,
    Processing,
    Completed,
    Failed,
    /// Any status this client does not know about. Treated as still running.
    #[serde(other)]
    Unknown,
}

/// Response of `GET /status/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub id: String,
    pub status: RemoteStatus,
    #[serde(default)]
    pub output: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_request_uses_fixed_generation_settings() {
        let req = RunRequest::for_capture("data:image/jpeg;base64,AAAA", "https://x/garment.png");
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "model_image": "data:image/jpeg;base64,AAAA",
                "garment_image": "https://x/garment.png",
                "category": "auto",
                "mode": "performance",
                "num_samples": 1,
                "seed": 42,
            })
        );
    }

    #[test]
    fn category_one_pieces_is_kebab_case() {
        assert_eq!(
            serde_json::to_value(Category::OnePieces).unwrap(),
            serde_json::json!("one-pieces")
        );
    }

    #[test]
    fn run_response_with_error_only() {
        let resp: RunResponse =
            serde_json::from_str(r#"{"error":"invalid garment_image"}"#).unwrap();
        assert_eq!(resp.id, "");
        assert_eq!(resp.error.as_deref(), Some("invalid garment_image"));
    }

    #[test]
    fn status_response_parses_every_known_status() {
        for (raw, expected) in [
            ("starting", RemoteStatus::Starting),
            ("in_queue", RemoteStatus::InQueue),
            ("processing", RemoteStatus::Processing),
            ("completed", RemoteStatus::Completed),
            ("failed", RemoteStatus::Failed),
        ] {
            let body = format!(r#"{{"id":"job1","status":"{raw}"}}"#);
            let resp: StatusResponse = serde_json::from_str(&body).unwrap();
            assert_eq!(resp.status, expected, "status {raw}");
            assert!(resp.output.is_none());
        }
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let resp: StatusResponse =
            serde_json::from_str(r#"{"id":"job1","status":"warming_up"}"#).unwrap();
        assert_eq!(resp.status, RemoteStatus::Unknown);
    }

    #[test]
    fn completed_status_keeps_output_order() {
        let resp: StatusResponse = serde_json::from_str(
            r#"{"id":"job1","status":"completed","output":["https://x/a.png","https://x/b.png"]}"#,
        )
        .unwrap();
        assert_eq!(
            resp.output.unwrap(),
            vec!["https://x/a.png".to_string(), "https://x/b.png".to_string()]
        );
    }
}
