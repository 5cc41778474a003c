//! Drives one try-on job from submission to a terminal outcome.
//!
//! [`TryOnOrchestrator::start`] submits the job, then polls its status
//! strictly sequentially (one query in flight, a fixed delay between
//! queries) until the service reports a terminal status. Every
//! transition is published on a [`tokio::sync::watch`] channel so a UI
//! can render progress via [`subscribe`](TryOnOrchestrator::subscribe).
//!
//! Each `start()` takes a ticket. [`reset`](TryOnOrchestrator::reset) and
//! any newer `start()` invalidate older tickets, and a transition is only
//! applied while the ticket and job id still match the active job. A
//! response that arrives for a discarded job is dropped and the stale
//! loop ends with [`TryOnError::Discarded`]. Reset is local only: the
//! remote job is not cancelled.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use atelier_camera::CapturedImage;
use tokio::sync::watch;

use crate::error::{MissingInput, TryOnError};
use crate::job::{TryOnJob, TryOnState};
use crate::messages::{JobId, RunRequest};
use crate::poll::{self, PollPolicy, PollStep};
use crate::service::GenerationService;

/// Orchestrates try-on jobs against a [`GenerationService`].
pub struct TryOnOrchestrator<S> {
    service: Arc<S>,
    policy: PollPolicy,
    state: watch::Sender<TryOnState>,
    /// Ticket of the active job. Only written inside a `watch` modify
    /// closure, so reads inside such closures are consistent with `state`.
    ticket: AtomicU64,
}

impl<S: GenerationService> TryOnOrchestrator<S> {
    pub fn new(service: Arc<S>, policy: PollPolicy) -> Self {
        let (state, _) = watch::channel(TryOnState::Idle);
        Self {
            service,
            policy,
            state,
            ticket: AtomicU64::new(0),
        }
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> TryOnState {
        self.state.borrow().clone()
    }

    /// Receive every state transition.
    pub fn subscribe(&self) -> watch::Receiver<TryOnState> {
        self.state.subscribe()
    }

    /// Run a try-on for a captured photo.
    ///
    /// See [`start_with_model_image`](Self::start_with_model_image).
    pub async fn start(
        &self,
        photo: Option<&CapturedImage>,
        garment_image: Option<&str>,
    ) -> Result<Vec<String>, TryOnError> {
        self.start_with_model_image(photo.map(CapturedImage::encoded_data), garment_image)
            .await
    }

    /// Run a try-on for a model image given as a data URI or URL.
    ///
    /// Fails fast with [`TryOnError::MissingInput`] (no request, no state
    /// change) when either input is absent or empty. Otherwise any
    /// previous job is discarded, a new one enters `Starting`, and the
    /// call resolves once the job is terminal: the output URLs on
    /// `Completed`, the failure on `Failed`. A call whose job is reset or
    /// superseded meanwhile resolves to [`TryOnError::Discarded`].
    pub async fn start_with_model_image(
        &self,
        model_image: Option<&str>,
        garment_image: Option<&str>,
    ) -> Result<Vec<String>, TryOnError> {
        let model_image =
            present(model_image).ok_or(TryOnError::MissingInput(MissingInput::ModelImage))?;
        let garment_image =
            present(garment_image).ok_or(TryOnError::MissingInput(MissingInput::GarmentImage))?;

        let ticket = self.begin();
        tracing::info!(ticket, garment_image = %garment_image, "Starting try-on job");

        let request = RunRequest::for_capture(model_image, garment_image);
        let job_id = match self.service.run(&request).await {
            Ok(job_id) => job_id,
            Err(e) => {
                let error = TryOnError::SubmissionRejected(e.to_string());
                tracing::warn!(ticket, error = %e, "Try-on submission rejected");
                return self.finish(ticket, None, error);
            }
        };

        if !self.apply(ticket, None, |job| job.accept(job_id.clone())) {
            tracing::info!(
                ticket,
                job_id = %job_id,
                "Ignoring submission result for discarded job",
            );
            return Err(TryOnError::Discarded);
        }
        tracing::info!(ticket, job_id = %job_id, "Try-on job accepted");

        self.poll_until_terminal(ticket, &job_id).await
    }

    /// Discard the current job and return to `Idle`.
    ///
    /// A no-op when already idle. An in-flight poll loop for the
    /// discarded job stops acting on results; nothing is sent to the
    /// remote service.
    pub fn reset(&self) {
        let discarded = self.state.send_if_modified(|state| {
            if state.is_idle() {
                return false;
            }
            self.ticket.fetch_add(1, Ordering::SeqCst);
            *state = TryOnState::Idle;
            true
        });

        if discarded {
            tracing::info!("Try-on job discarded");
        }
    }

    // ---- private helpers ----

    /// Invalidate older tickets and install a fresh `Starting` job.
    fn begin(&self) -> u64 {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.ticket.fetch_add(1, Ordering::SeqCst) + 1;
            *state = TryOnState::Active(TryOnJob::starting());
        });
        ticket
    }

    /// Poll until the job reaches a terminal phase, the ticket goes
    /// stale, or the policy bound is hit. With a wall-clock bound, a
    /// status query still pending at the deadline is abandoned.
    async fn poll_until_terminal(
        &self,
        ticket: u64,
        job_id: &JobId,
    ) -> Result<Vec<String>, TryOnError> {
        let mut budget = self.policy.budget();

        loop {
            let query = self.service.status(job_id);
            let response = match budget.remaining() {
                None => query.await,
                Some(remaining) => match tokio::time::timeout(remaining, query).await {
                    Ok(response) => response,
                    Err(_) => {
                        budget.record_attempt();
                        tracing::warn!(
                            job_id = %job_id,
                            attempts = budget.attempts(),
                            "Try-on status query outlived the poll timeout",
                        );
                        return self.finish(ticket, Some(job_id), budget.timed_out());
                    }
                },
            };
            budget.record_attempt();

            let step = match response {
                Ok(status) => {
                    tracing::debug!(
                        job_id = %job_id,
                        attempt = budget.attempts(),
                        status = ?status.status,
                        "Try-on status",
                    );
                    poll::evaluate(&status)
                }
                Err(e) => {
                    tracing::warn!(job_id = %job_id, error = %e, "Try-on status check failed");
                    PollStep::Failed(TryOnError::PollTransport(e.to_string()))
                }
            };

            match step {
                PollStep::Continue(phase) => {
                    if !self.is_current(ticket, job_id, |job| job.advance(phase)) {
                        return Err(TryOnError::Discarded);
                    }
                }
                PollStep::Completed(images) => {
                    if !self.apply(ticket, Some(job_id), |job| job.complete(images.clone())) {
                        tracing::info!(job_id = %job_id, "Ignoring result for discarded job");
                        return Err(TryOnError::Discarded);
                    }
                    tracing::info!(
                        job_id = %job_id,
                        attempts = budget.attempts(),
                        outputs = images.len(),
                        "Try-on completed",
                    );
                    return Ok(images);
                }
                PollStep::Failed(error) => return self.finish(ticket, Some(job_id), error),
            }

            if let Some(error) = budget.exhausted() {
                tracing::warn!(
                    job_id = %job_id,
                    attempts = budget.attempts(),
                    "Try-on poll bound reached",
                );
                return self.finish(ticket, Some(job_id), error);
            }

            tokio::time::sleep(budget.next_delay(self.policy.interval)).await;

            if !self.is_current(ticket, job_id, |_| false) {
                tracing::debug!(job_id = %job_id, "Poll loop stopped for discarded job");
                return Err(TryOnError::Discarded);
            }

            if let Some(error) = budget.exhausted() {
                tracing::warn!(
                    job_id = %job_id,
                    attempts = budget.attempts(),
                    "Try-on poll timeout reached",
                );
                return self.finish(ticket, Some(job_id), error);
            }
        }
    }

    /// Fail the job (if still current) and hand the error to the caller.
    fn finish(
        &self,
        ticket: u64,
        job_id: Option<&JobId>,
        error: TryOnError,
    ) -> Result<Vec<String>, TryOnError> {
        if self.apply(ticket, job_id, |job| job.fail(error.clone())) {
            tracing::warn!(error = %error, "Try-on failed");
            Err(error)
        } else {
            tracing::info!(error = %error, "Ignoring failure for discarded job");
            Err(TryOnError::Discarded)
        }
    }

    /// Like [`apply`](Self::apply), but a no-op mutation still counts as
    /// current.
    fn is_current(
        &self,
        ticket: u64,
        job_id: &JobId,
        mutate: impl FnOnce(&mut TryOnJob) -> bool,
    ) -> bool {
        let mut current = false;
        self.state.send_if_modified(|state| {
            let Some(job) = self.active_job(state, ticket, Some(job_id)) else {
                return false;
            };
            current = true;
            mutate(job)
        });
        current
    }

    /// Apply `mutate` to the active job if `ticket` (and `job_id`, once
    /// known) still identify it. Returns `true` only if the mutation was
    /// applied and changed the job.
    fn apply(
        &self,
        ticket: u64,
        job_id: Option<&JobId>,
        mutate: impl FnOnce(&mut TryOnJob) -> bool,
    ) -> bool {
        self.state
            .send_if_modified(|state| self.active_job(state, ticket, job_id).is_some_and(mutate))
    }

    fn active_job<'a>(
        &self,
        state: &'a mut TryOnState,
        ticket: u64,
        job_id: Option<&JobId>,
    ) -> Option<&'a mut TryOnJob> {
        if self.ticket.load(Ordering::SeqCst) != ticket {
            return None;
        }
        match state {
            TryOnState::Active(job) if job_id.is_none() || job.job_id() == job_id => Some(job),
            _ => None,
        }
    }
}

/// Treat empty or whitespace-only strings as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
