//! REST API client for the product catalog.

use crate::product::{ProductDisplay, ProductId, ProductSummary};

/// HTTP client for the catalog service.
pub struct CatalogApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the catalog REST layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// `GET /products/{id}/display` answered 404.
    #[error("Product {0} not found")]
    NotFound(ProductId),
}

impl CatalogApi {
    /// * `base_url` - e.g. `http://localhost:8000`, without trailing slash.
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// List products in catalog order.
    pub async fn list_products(&self) -> Result<Vec<ProductSummary>, CatalogError> {
        let response = self
            .client
            .get(format!("{}/products", self.base_url))
            .send()
            .await?;

        let products: Vec<ProductSummary> = Self::parse_response(response).await?;
        tracing::debug!(count = products.len(), "Catalog products listed");
        Ok(products)
    }

    /// Fetch the display record of one product.
    pub async fn product_display(&self, id: &ProductId) -> Result<ProductDisplay, CatalogError> {
        let response = self
            .client
            .get(format!("{}/products/{}/display", self.base_url, id))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id.clone()));
        }
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
