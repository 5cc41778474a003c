//! Virtual try-on client for the garment-swap generation service.
//!
//! Provides the typed wire contract, a [`reqwest`]-based HTTP client,
//! and [`TryOnOrchestrator`], which drives one job from submission
//! through status polling to a terminal outcome.

pub mod api;
pub mod config;
pub mod error;
pub mod job;
pub mod messages;
pub mod orchestrator;
pub mod poll;
pub mod service;

pub use api::{FashnApi, FashnApiError};
pub use config::FashnConfig;
pub use error::{MissingInput, TryOnError};
pub use job::{JobPhase, TryOnJob, TryOnState};
pub use messages::{Category, JobId, Mode, RemoteStatus, RunRequest, StatusResponse};
pub use orchestrator::TryOnOrchestrator;
pub use poll::PollPolicy;
pub use service::GenerationService;
