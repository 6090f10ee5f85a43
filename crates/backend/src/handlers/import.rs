use axum::{http::StatusCode, Json};
use contracts::domain::import::ImportSummary;
use serde_json::json;

use crate::domain::products::{bulk_import, csv_import};

/// POST /api/admin/products/import
///
/// Body is the raw CSV text. A header missing required columns aborts the
/// whole request with 400 and the column names; otherwise every parsed row
/// is attempted and the summary reports per-row outcomes.
pub async fn import_csv(body: String) -> Result<Json<ImportSummary>, (StatusCode, Json<serde_json::Value>)> {
    let rows = csv_import::parse_products_csv(&body).map_err(|e| {
        tracing::warn!("CSV import rejected: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
    })?;

    let summary = bulk_import::run_bulk_import(&bulk_import::RepositoryStore, rows).await;
    Ok(Json(summary))
}
