//! Shared building blocks for the `atelier` workspace.
//!
//! Holds the cross-crate types, the domain error enum and the
//! browsing-session key-value store that hands state between screens.

pub mod config;
pub mod error;
pub mod session_store;
pub mod types;
