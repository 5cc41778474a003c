//! Try-on job record and its phase machine.
//!
//! ```text
//! Starting --accepted--> Queued --> Processing --> Completed
//!     |                    |            |
//!     +--------------------+------------+--------> Failed
//! ```
//!
//! `Completed` and `Failed` are terminal: every mutator returns `false`
//! and leaves the job untouched once one of them is reached.

use atelier_core::types::Timestamp;

use crate::error::TryOnError;
use crate::messages::JobId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    /// Submission sent, no job id yet.
    Starting,
    /// Accepted by the service, waiting for a worker.
    Queued,
    /// A worker is generating the result.
    Processing,
    Completed,
    Failed,
}

impl JobPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Position along the non-terminal path, used to keep progress monotonic.
    fn rank(self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Queued => 1,
            Self::Processing => 2,
            Self::Completed | Self::Failed => 3,
        }
    }
}

/// One try-on job as seen by the client.
///
/// `result_images` is non-empty exactly when the phase is `Completed`;
/// `error` is set exactly when the phase is `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnJob {
    job_id: Option<JobId>,
    phase: JobPhase,
    result_images: Vec<String>,
    error: Option<TryOnError>,
    created_at: Timestamp,
    finished_at: Option<Timestamp>,
}

impl TryOnJob {
    /// A job whose submission is in flight.
    pub fn starting() -> Self {
        Self {
            job_id: None,
            phase: JobPhase::Starting,
            result_images: Vec::new(),
            error: None,
            created_at: chrono::Utc::now(),
            finished_at: None,
        }
    }

    pub fn job_id(&self) -> Option<&JobId> {
        self.job_id.as_ref()
    }

    pub fn phase(&self) -> JobPhase {
        self.phase
    }

    pub fn result_images(&self) -> &[String] {
        &self.result_images
    }

    pub fn error(&self) -> Option<&TryOnError> {
        self.error.as_ref()
    }

    /// The failure message shown to the user, when `Failed`.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn finished_at(&self) -> Option<Timestamp> {
        self.finished_at
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Record the server-assigned id. Only valid while `Starting`.
    pub fn accept(&mut self, job_id: JobId) -> bool {
        if self.phase != JobPhase::Starting {
            return false;
        }
        self.job_id = Some(job_id);
        self.phase = JobPhase::Queued;
        true
    }

    /// Move to a later non-terminal phase. Regressions are ignored.
    pub fn advance(&mut self, phase: JobPhase) -> bool {
        if self.is_terminal() || phase.is_terminal() || phase.rank() <= self.phase.rank() {
            return false;
        }
        self.phase = phase;
        true
    }

    /// Finish successfully. An empty output fails the job instead.
    pub fn complete(&mut self, images: Vec<String>) -> bool {
        if images.is_empty() {
            return self.fail(TryOnError::EmptyResult);
        }
        if self.is_terminal() {
            return false;
        }
        self.phase = JobPhase::Completed;
        self.result_images = images;
        self.finished_at = Some(chrono::Utc::now());
        true
    }

    /// Finish unsuccessfully.
    pub fn fail(&mut self, error: TryOnError) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.phase = JobPhase::Failed;
        self.error = Some(error);
        self.finished_at = Some(chrono::Utc::now());
        true
    }
}

/// What the orchestrator publishes to observers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TryOnState {
    /// No job; ready for `start()`.
    #[default]
    Idle,
    Active(TryOnJob),
}

impl TryOnState {
    pub fn job(&self) -> Option<&TryOnJob> {
        match self {
            Self::Idle => None,
            Self::Active(job) => Some(job),
        }
    }

    pub fn phase(&self) -> Option<JobPhase> {
        self.job().map(TryOnJob::phase)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
