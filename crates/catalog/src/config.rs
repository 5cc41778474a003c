use atelier_core::config::{normalize_base_url, process_env, required_var};
use atelier_core::error::CoreError;

use crate::api::CatalogApi;

/// Catalog service location.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
}

impl CatalogConfig {
    /// Load from `CATALOG_BASE_URL` (required).
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let base_url = required_var(&lookup, "CATALOG_BASE_URL")?;
        Ok(Self {
            base_url: normalize_base_url(&base_url),
        })
    }

    pub fn api(&self) -> CatalogApi {
        CatalogApi::new(self.base_url.clone())
    }
}
