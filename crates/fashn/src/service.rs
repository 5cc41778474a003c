//! The seam between the orchestrator and the generation backend.

use async_trait::async_trait;

use crate::api::FashnApiError;
use crate::messages::{JobId, RunRequest, StatusResponse};

/// A remote service that runs garment-swap jobs.
///
/// [`FashnApi`](crate::api::FashnApi) is the HTTP implementation; tests
/// substitute scripted fakes.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Submit a job and return its server-assigned id.
    async fn run(&self, request: &RunRequest) -> Result<JobId, FashnApiError>;

    /// Query the current status of a job.
    async fn status(&self, job_id: &JobId) -> Result<StatusResponse, FashnApiError>;
}
