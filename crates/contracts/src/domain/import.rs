use serde::{Deserialize, Serialize};

/// One parsed, validated CSV record awaiting import.
///
/// Held in memory between parse and import; never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Outcome of one insert attempt, paired with the originating row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    pub message: String,
    pub row: ProductRow,
}

/// Aggregate view over a finished import pass.
///
/// `imported + failed` always equals the number of submitted rows; the
/// full result list is kept for line-by-line review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
    pub results: Vec<ImportResult>,
}
