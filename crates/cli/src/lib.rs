//! `atelier` command-line front end.
//!
//! Wires the catalog, the camera session and the try-on orchestrator
//! together the way the app screens do: pick a garment, capture a photo,
//! run the try-on and show the result.

pub mod args;
pub mod commands;
pub mod error;

pub use error::CliError;
