//! Read-only client for the product catalog service.
//!
//! The catalog lists products (`GET /products`) and serves the full
//! display record of one product (`GET /products/{id}/display`), whose
//! image is what the try-on flow uses as the garment reference.

pub mod api;
pub mod config;
pub mod product;

pub use api::{CatalogApi, CatalogError};
pub use config::CatalogConfig;
pub use product::{ProductDisplay, ProductId, ProductSummary};
