use chrono::Utc;
use contracts::domain::category::{CategoryDto, ProductCategory};

use super::repository;

pub async fn create(dto: CategoryDto) -> anyhow::Result<ProductCategory> {
    let name = dto.name.trim().to_string();
    if name.is_empty() {
        anyhow::bail!("Category name is required");
    }
    if repository::get_by_name(&name).await?.is_some() {
        anyhow::bail!("Category \"{}\" already exists", name);
    }

    let category = ProductCategory {
        id: uuid::Uuid::new_v4().to_string(),
        name,
        description: dto.description.filter(|d| !d.trim().is_empty()),
        created_at: Utc::now().to_rfc3339(),
    };
    repository::insert(&category).await?;
    Ok(category)
}

pub async fn delete(id: &str) -> anyhow::Result<bool> {
    repository::delete(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<ProductCategory>> {
    repository::list_all().await
}
