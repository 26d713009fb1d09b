//! Catalog entities as served by the backend.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type-safe identifier for Products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    /// Image URLs in display order; the first one is the list thumbnail.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl Product {
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_tolerates_missing_optional_fields() {
        let json = r#"{"id":"p1","name":"Napoleon","isAvailable":true}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId::from("p1"));
        assert!(product.images.is_empty());
        assert!(product.price.is_none());
        assert!(product.thumbnail().is_none());
        assert!(product.is_available);
    }

    #[test]
    fn test_product_availability_defaults_to_false() {
        let json = r#"{"id":"p2","name":"Eclair","images":["a.jpg","b.jpg"],"price":250}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert!(!product.is_available);
        assert_eq!(product.thumbnail(), Some("a.jpg"));
        assert_eq!(product.price, Some(250.0));
    }
}
