use chrono::Utc;
use contracts::domain::product::{Product, ProductDto};

use super::repository;
use crate::shared::changes::{self, ChangeOp, ChangedTable};

/// Create a product. Required-field and price validation happens here,
/// before any write.
pub async fn create(dto: ProductDto) -> anyhow::Result<Product> {
    validate(&dto)?;

    let now = Utc::now().to_rfc3339();
    let product = Product {
        id: uuid::Uuid::new_v4().to_string(),
        name: dto.name.trim().to_string(),
        category: dto.category.trim().to_string(),
        price: dto.price,
        description: dto.description.filter(|d| !d.trim().is_empty()),
        features: dto.features.filter(|f| !f.is_empty()),
        image_url: dto.image_url.filter(|u| !u.trim().is_empty()),
        is_active: dto.is_active.unwrap_or(true),
        created_at: now.clone(),
        updated_at: now,
    };

    repository::insert(&product).await?;
    changes::publish(ChangedTable::Products, ChangeOp::Insert);
    Ok(product)
}

pub async fn update(dto: ProductDto) -> anyhow::Result<Product> {
    let id = dto
        .id
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Product id is required for update"))?;
    validate(&dto)?;

    let mut product = repository::get_by_id(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Product not found"))?;

    product.name = dto.name.trim().to_string();
    product.category = dto.category.trim().to_string();
    product.price = dto.price;
    product.description = dto.description.filter(|d| !d.trim().is_empty());
    product.features = dto.features.filter(|f| !f.is_empty());
    product.image_url = dto.image_url.filter(|u| !u.trim().is_empty());
    if let Some(active) = dto.is_active {
        product.is_active = active;
    }
    product.updated_at = Utc::now().to_rfc3339();

    repository::update(&product).await?;
    changes::publish(ChangedTable::Products, ChangeOp::Update);
    Ok(product)
}

pub async fn set_active(id: &str, is_active: bool) -> anyhow::Result<bool> {
    let changed = repository::set_active(id, is_active).await?;
    if changed {
        changes::publish(ChangedTable::Products, ChangeOp::Update);
    }
    Ok(changed)
}

pub async fn set_image_url(id: &str, image_url: &str) -> anyhow::Result<bool> {
    let changed = repository::set_image_url(id, image_url).await?;
    if changed {
        changes::publish(ChangedTable::Products, ChangeOp::Update);
    }
    Ok(changed)
}

pub async fn delete(id: &str) -> anyhow::Result<bool> {
    let deleted = repository::delete(id).await?;
    if deleted {
        changes::publish(ChangedTable::Products, ChangeOp::Delete);
    }
    Ok(deleted)
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<Product>> {
    repository::get_by_id(id).await
}

pub async fn list_active(
    search: Option<&str>,
    category: Option<&str>,
) -> anyhow::Result<Vec<Product>> {
    repository::list_active(search, category).await
}

pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    repository::list_all().await
}

fn validate(dto: &ProductDto) -> anyhow::Result<()> {
    if dto.name.trim().is_empty() {
        anyhow::bail!("Product name is required");
    }
    if dto.category.trim().is_empty() {
        anyhow::bail!("Product category is required");
    }
    if !dto.price.is_finite() || dto.price <= 0.0 {
        anyhow::bail!("Product price must be a positive number");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, category: &str, price: f64) -> ProductDto {
        ProductDto {
            id: None,
            name: name.to_string(),
            category: category.to_string(),
            price,
            description: None,
            features: None,
            image_url: None,
            is_active: None,
        }
    }

    #[test]
    fn rejects_blank_name() {
        assert!(validate(&dto("  ", "Brakes", 100.0)).is_err());
    }

    #[test]
    fn rejects_non_positive_price() {
        assert!(validate(&dto("Brake Pad", "Brakes", 0.0)).is_err());
        assert!(validate(&dto("Brake Pad", "Brakes", -5.0)).is_err());
        assert!(validate(&dto("Brake Pad", "Brakes", f64::NAN)).is_err());
    }

    #[test]
    fn accepts_valid_dto() {
        assert!(validate(&dto("Brake Pad", "Brakes", 1500.0)).is_ok());
    }
}
