//! REST API client for the garment-swap generation service.
//!
//! Wraps `POST /run` and `GET /status/{id}` using [`reqwest`], with the
//! bearer token attached to every request.

use async_trait::async_trait;

use crate::messages::{JobId, RunRequest, RunResponse, StatusResponse};
use crate::service::GenerationService;

const START_FAILED: &str = "Failed to start try-on";
const STATUS_FAILED: &str = "Failed to check status";

/// HTTP client for one generation service account.
pub struct FashnApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Errors from the generation service REST layer.
#[derive(Debug, thiserror::Error)]
pub enum FashnApiError {
    /// The HTTP request itself failed (network, DNS, TLS, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code without an error payload.
    #[error("{action}: {status_text}")]
    ApiError {
        /// What the client was doing, e.g. "Failed to start try-on".
        action: &'static str,
        /// HTTP status code.
        status: u16,
        /// Status line, e.g. `500 Internal Server Error`.
        status_text: String,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response payload carried an `error` field.
    #[error("{0}")]
    Rejected(String),

    /// The response body was not the expected JSON.
    #[error("Invalid response from try-on service: {0}")]
    Decode(String),
}

impl FashnApi {
    /// Create a new API client.
    ///
    /// * `base_url` - e.g. `https://api.fashn.ai/v1`, without trailing slash.
    /// * `api_key`  - bearer token.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a try-on job.
    ///
    /// An `error` field in the body is a rejection even on a 2xx status;
    /// on a non-2xx status it is preferred over the bare status line.
    pub async fn start_job(&self, request: &RunRequest) -> Result<JobId, FashnApiError> {
        let response = self
            .client
            .post(format!("{}/run", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed = serde_json::from_str::<RunResponse>(&body);

        if let Ok(RunResponse {
            error: Some(error), ..
        }) = &parsed
        {
            return Err(FashnApiError::Rejected(error.clone()));
        }

        if !status.is_success() {
            return Err(FashnApiError::ApiError {
                action: START_FAILED,
                status: status.as_u16(),
                status_text: status.to_string(),
                body,
            });
        }

        let parsed = parsed.map_err(|e| FashnApiError::Decode(e.to_string()))?;
        if parsed.id.is_empty() {
            return Err(FashnApiError::Decode("response carried no job id".into()));
        }

        tracing::debug!(job_id = %parsed.id, "Try-on job accepted");
        Ok(JobId::new(parsed.id))
    }

    /// Retrieve the status of a job.
    pub async fn job_status(&self, job_id: &JobId) -> Result<StatusResponse, FashnApiError> {
        let response = self
            .client
            .get(format!("{}/status/{}", self.base_url, job_id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let response = Self::ensure_success(response, STATUS_FAILED).await?;
        Ok(response.json::<StatusResponse>().await?)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`FashnApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
        action: &'static str,
    ) -> Result<reqwest::Response, FashnApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FashnApiError::ApiError {
                action,
                status: status.as_u16(),
                status_text: status.to_string(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl GenerationService for FashnApi {
    async fn run(&self, request: &RunRequest) -> Result<JobId, FashnApiError> {
        self.start_job(request).await
    }

    async fn status(&self, job_id: &JobId) -> Result<StatusResponse, FashnApiError> {
        self.job_status(job_id).await
    }
}
