use async_trait::async_trait;
use contracts::domain::import::{ImportResult, ImportSummary, ProductRow};
use contracts::domain::product::{Product, ProductDto};

/// Insert target for the bulk importer. Production code goes through the
/// products service; tests substitute a fake.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_row(&self, row: &ProductRow) -> anyhow::Result<Product>;
}

/// Store backed by the real products service/repository.
pub struct RepositoryStore;

#[async_trait]
impl ProductStore for RepositoryStore {
    async fn insert_row(&self, row: &ProductRow) -> anyhow::Result<Product> {
        super::service::create(ProductDto {
            id: None,
            name: row.name.clone(),
            category: row.category.clone(),
            price: row.price,
            description: row.description.clone(),
            features: row.features.clone(),
            image_url: row.image_url.clone(),
            is_active: Some(row.is_active.unwrap_or(true)),
        })
        .await
    }
}

/// Persist parsed rows one at a time, in order.
///
/// Each row is an independent insert: a failure is terminal for that row
/// only and never aborts the rest of the batch. There is no retry and no
/// transaction across rows; at most one insert is in flight at a time.
pub async fn run_bulk_import(store: &dyn ProductStore, rows: Vec<ProductRow>) -> ImportSummary {
    let mut results: Vec<ImportResult> = Vec::with_capacity(rows.len());

    for row in rows {
        match store.insert_row(&row).await {
            Ok(product) => results.push(ImportResult {
                success: true,
                message: format!("Successfully imported \"{}\"", product.name),
                row,
            }),
            Err(e) => results.push(ImportResult {
                success: false,
                message: format!("Failed to import \"{}\": {}", row.name, e),
                row,
            }),
        }
    }

    let imported = results.iter().filter(|r| r.success).count();
    let failed = results.len() - imported;

    tracing::info!("Bulk import finished: {} imported, {} failed", imported, failed);

    ImportSummary {
        imported,
        failed,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fake store that fails for any row whose name contains "bad".
    struct FlakyStore {
        calls: AtomicUsize,
    }

    impl FlakyStore {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProductStore for FlakyStore {
        async fn insert_row(&self, row: &ProductRow) -> anyhow::Result<Product> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if row.name.contains("bad") {
                anyhow::bail!("UNIQUE constraint failed: products.name");
            }
            let now = chrono::Utc::now().to_rfc3339();
            Ok(Product {
                id: uuid::Uuid::new_v4().to_string(),
                name: row.name.clone(),
                category: row.category.clone(),
                price: row.price,
                description: row.description.clone(),
                features: row.features.clone(),
                image_url: row.image_url.clone(),
                is_active: row.is_active.unwrap_or(true),
                created_at: now.clone(),
                updated_at: now,
            })
        }
    }

    fn row(name: &str) -> ProductRow {
        ProductRow {
            name: name.to_string(),
            category: "Brakes".to_string(),
            price: 1500.0,
            description: None,
            features: None,
            image_url: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn every_row_gets_exactly_one_result() {
        let store = FlakyStore::new();
        let rows = vec![row("a"), row("bad-1"), row("b"), row("bad-2"), row("c")];
        let summary = run_bulk_import(&store, rows).await;

        assert_eq!(summary.results.len(), 5);
        assert_eq!(summary.imported + summary.failed, 5);
        assert_eq!(summary.imported, 3);
        assert_eq!(summary.failed, 2);
        assert_eq!(store.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn failure_does_not_stop_later_rows() {
        let store = FlakyStore::new();
        let rows = vec![row("bad-first"), row("second")];
        let summary = run_bulk_import(&store, rows).await;

        assert!(!summary.results[0].success);
        assert!(summary.results[1].success);
    }

    #[tokio::test]
    async fn results_preserve_input_order_and_retain_rows() {
        let store = FlakyStore::new();
        let rows = vec![row("alpha"), row("bad-beta"), row("gamma")];
        let summary = run_bulk_import(&store, rows).await;

        let names: Vec<&str> = summary
            .results
            .iter()
            .map(|r| r.row.name.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "bad-beta", "gamma"]);
    }

    #[tokio::test]
    async fn failure_message_embeds_store_error_text() {
        let store = FlakyStore::new();
        let summary = run_bulk_import(&store, vec![row("bad-pad")]).await;

        assert!(summary.results[0].message.contains("bad-pad"));
        assert!(summary.results[0].message.contains("UNIQUE constraint failed"));
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_summary() {
        let store = FlakyStore::new();
        let summary = run_bulk_import(&store, Vec::new()).await;
        assert_eq!(summary.imported, 0);
        assert_eq!(summary.failed, 0);
        assert!(summary.results.is_empty());
    }
}
