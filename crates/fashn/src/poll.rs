//! Status polling policy and the per-response transition function.
//!
//! [`evaluate`] maps one [`StatusResponse`] onto the next step of the
//! job state machine. [`PollPolicy`] fixes the delay between queries and
//! the optional bounds; the default reproduces the service's intended
//! client behaviour: a flat 2-second interval with no ceiling.

use std::time::Duration;

use tokio::time::Instant;

use crate::error::TryOnError;
use crate::job::JobPhase;
use crate::messages::{RemoteStatus, StatusResponse};

/// Delay between two status queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// What to do after one status response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStep {
    /// Not finished; wait one interval and query again.
    Continue(JobPhase),
    /// Finished with these output URLs (never empty).
    Completed(Vec<String>),
    /// Finished unsuccessfully.
    Failed(TryOnError),
}

/// Map a status response onto the next poll step.
pub fn evaluate(status: &StatusResponse) -> PollStep {
    match status.status {
        RemoteStatus::Starting | RemoteStatus::InQueue | RemoteStatus::Unknown => {
            PollStep::Continue(JobPhase::Queued)
        }
        RemoteStatus::Processing => PollStep::Continue(JobPhase::Processing),
        RemoteStatus::Completed => match &status.output {
            Some(output) if !output.is_empty() => PollStep::Completed(output.clone()),
            _ => PollStep::Failed(TryOnError::EmptyResult),
        },
        RemoteStatus::Failed => PollStep::Failed(TryOnError::remote_failure(status.error.clone())),
    }
}

/// Interval and optional bounds of the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Give up after this many status queries. `None` = unbounded.
    pub max_attempts: Option<u32>,
    /// Give up once this much time has passed since the first query.
    /// `None` = unbounded.
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
            timeout: None,
        }
    }
}

impl PollPolicy {
    /// Start tracking a new poll loop against this policy.
    pub fn budget(&self) -> PollBudget {
        PollBudget {
            attempts: 0,
            started: Instant::now(),
            max_attempts: self.max_attempts,
            timeout: self.timeout,
        }
    }
}

/// Attempt and wall-clock accounting for one poll loop.
#[derive(Debug)]
pub struct PollBudget {
    attempts: u32,
    started: Instant,
    max_attempts: Option<u32>,
    timeout: Option<Duration>,
}

impl PollBudget {
    pub fn record_attempt(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Time left before the wall-clock bound. `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.timeout
            .map(|limit| limit.saturating_sub(self.started.elapsed()))
    }

    /// The wait before the next query, cut short by the wall-clock bound.
    pub fn next_delay(&self, interval: Duration) -> Duration {
        self.remaining()
            .map_or(interval, |remaining| remaining.min(interval))
    }

    /// `Some(PollTimeout)` once either bound has been reached.
    pub fn exhausted(&self) -> Option<TryOnError> {
        let over_attempts = self.max_attempts.is_some_and(|max| self.attempts >= max);
        let over_time = self.remaining().is_some_and(|left| left.is_zero());

        (over_attempts || over_time).then(|| self.timed_out())
    }

    /// The error reported when a bound ends the loop.
    pub fn timed_out(&self) -> TryOnError {
        TryOnError::PollTimeout {
            attempts: self.attempts,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
