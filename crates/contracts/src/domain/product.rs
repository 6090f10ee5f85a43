use serde::{Deserialize, Serialize};

/// Canonical catalog record.
///
/// Columns are the lower-case schema (`name`, `category`, `price`, ...);
/// the capitalized column variant that existed in an earlier revision of
/// the catalog is not supported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Query parameters for the storefront product listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive match against name and description.
    pub search: Option<String>,
    /// Exact category filter.
    pub category: Option<String>,
}
