//! Failure taxonomy of a try-on job.
//!
//! Every variant except [`TryOnError::Discarded`] ends a job in the
//! `Failed` phase. `Display` is the message surfaced to the user.

use std::fmt;

/// Message used when the service reports `failed` without details.
pub const DEFAULT_REMOTE_FAILURE: &str = "Try-on failed";

/// Which input was absent when a job was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    /// No captured photo.
    ModelImage,
    /// No garment reference.
    GarmentImage,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelImage => f.write_str("capture a photo first"),
            Self::GarmentImage => f.write_str("select a garment first"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TryOnError {
    /// Photo or garment absent at `start()`. No request was made.
    #[error("Missing input: {0}")]
    MissingInput(MissingInput),

    /// The service refused the submission, or the request itself failed.
    #[error("{0}")]
    SubmissionRejected(String),

    /// A status query failed at the transport or parsing level.
    #[error("{0}")]
    PollTransport(String),

    /// The job completed without any output image.
    #[error("No result generated")]
    EmptyResult,

    /// The service reported the job as failed.
    #[error("{0}")]
    RemoteFailure(String),

    /// The configured poll bound was reached before a terminal status.
    #[error("Try-on timed out after {attempts} status checks")]
    PollTimeout { attempts: u32 },

    /// The job was reset or superseded while this call was in flight.
    /// Returned to the stale caller only; never stored as job state.
    #[error("Try-on job was discarded")]
    Discarded,
}

impl TryOnError {
    /// A `failed` status, with the server's message or the default.
    pub fn remote_failure(message: Option<String>) -> Self {
        Self::RemoteFailure(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REMOTE_FAILURE.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_message() {
        assert_eq!(TryOnError::EmptyResult.to_string(), "No result generated");
    }

    #[test]
    fn remote_failure_defaults_when_message_absent() {
        assert_eq!(
            TryOnError::remote_failure(None).to_string(),
            DEFAULT_REMOTE_FAILURE
        );
        assert_eq!(
            TryOnError::remote_failure(Some(String::new())).to_string(),
            DEFAULT_REMOTE_FAILURE
        );
        assert_eq!(
            TryOnError::remote_failure(Some("pose not detected".into())).to_string(),
            "pose not detected"
        );
    }

    #[test]
    fn server_messages_pass_through_verbatim() {
        let err = TryOnError::SubmissionRejected("invalid garment_image".into());
        assert_eq!(err.to_string(), "invalid garment_image");
    }
}
