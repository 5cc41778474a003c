//! Catalog wire types.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Product identifier. The catalog emits ids as JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Integer-looking input becomes [`ProductId::Number`], anything else
/// [`ProductId::Text`].
impl FromStr for ProductId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<i64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(s.to_string())))
    }
}

/// One entry of `GET /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

/// Full display record from `GET /products/{id}/display`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDisplay {
    pub id: ProductId,
    /// Image URL or data URI; used as the try-on garment reference.
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub graphic: String,
    #[serde(default)]
    pub variant: String,
    #[serde(default)]
    pub stock: i64,
    /// Pre-formatted with currency, e.g. `"$49.00"`.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub stock_status: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let numeric: ProductId = serde_json::from_value(json!(17)).unwrap();
        let text: ProductId = serde_json::from_value(json!("sku-17")).unwrap();

        assert_eq!(numeric, ProductId::Number(17));
        assert_eq!(text, ProductId::Text("sku-17".into()));
        assert_eq!(numeric.to_string(), "17");
        assert_eq!(text.to_string(), "sku-17");
    }

    #[test]
    fn ids_parse_from_command_line_text() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::Number(42));
        assert_eq!(
            "tee-black".parse::<ProductId>().unwrap(),
            ProductId::Text("tee-black".into())
        );
    }

    #[test]
    fn display_record_maps_type_field() {
        let display: ProductDisplay = serde_json::from_value(json!({
            "id": 3,
            "image": "https://cdn/tee.png",
            "description": "Heavyweight tee",
            "type": "tops",
            "color": "black",
            "graphic": "none",
            "variant": "M",
            "stock": 12,
            "price": "$35.00",
            "created_at": "2024-05-01T10:00:00Z",
            "stock_status": "in_stock",
        }))
        .unwrap();

        assert_eq!(display.id, ProductId::Number(3));
        assert_eq!(display.kind, "tops");
        assert_eq!(display.stock, 12);
        assert_eq!(display.price, "$35.00");
    }

    #[test]
    fn summary_needs_only_an_id() {
        let summary: ProductSummary = serde_json::from_value(json!({ "id": "a1" })).unwrap();
        assert_eq!(summary.id, ProductId::Text("a1".into()));
        assert!(summary.image.is_none());
    }
}
