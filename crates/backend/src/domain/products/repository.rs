use chrono::Utc;
use contracts::domain::product::Product;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: Option<String>,
    /// JSON array of strings.
    pub features: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        let features = m
            .features
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok());
        Product {
            id: m.id,
            name: m.name,
            category: m.category,
            price: m.price,
            description: m.description,
            features,
            image_url: m.image_url,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn encode_features(features: &Option<Vec<String>>) -> Option<String> {
    features
        .as_ref()
        .map(|f| serde_json::to_string(f).unwrap_or_else(|_| "[]".to_string()))
}

fn active_model(product: &Product) -> ActiveModel {
    ActiveModel {
        id: Set(product.id.clone()),
        name: Set(product.name.clone()),
        category: Set(product.category.clone()),
        price: Set(product.price),
        description: Set(product.description.clone()),
        features: Set(encode_features(&product.features)),
        image_url: Set(product.image_url.clone()),
        is_active: Set(product.is_active),
        created_at: Set(product.created_at.clone()),
        updated_at: Set(product.updated_at.clone()),
    }
}

/// Storefront listing: active products only, optionally narrowed by search
/// text and/or category, ordered by name.
pub async fn list_active(
    search: Option<&str>,
    category: Option<&str>,
) -> anyhow::Result<Vec<Product>> {
    let mut query = Entity::find().filter(Column::IsActive.eq(true));

    if let Some(term) = search.filter(|s| !s.trim().is_empty()) {
        let term = term.trim();
        query = query.filter(
            Condition::any()
                .add(Column::Name.contains(term))
                .add(Column::Description.contains(term)),
        );
    }
    if let Some(cat) = category.filter(|c| !c.trim().is_empty()) {
        query = query.filter(Column::Category.eq(cat.trim()));
    }

    let mut items: Vec<Product> = query
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(items)
}

/// Back-office listing: everything, inactive included, newest first.
pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    let mut items: Vec<Product> = Entity::find()
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(items)
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<Product>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(product: &Product) -> anyhow::Result<()> {
    active_model(product).insert(conn()).await?;
    Ok(())
}

pub async fn update(product: &Product) -> anyhow::Result<()> {
    active_model(product).update(conn()).await?;
    Ok(())
}

pub async fn set_active(id: &str, is_active: bool) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsActive, Expr::value(is_active))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now().to_rfc3339()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn set_image_url(id: &str, image_url: &str) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::ImageUrl, Expr::value(image_url.to_string()))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now().to_rfc3339()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn delete(id: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}

/// Distinct category names seen in the catalog (for the storefront filter).
pub async fn distinct_categories() -> anyhow::Result<Vec<String>> {
    use sea_orm::QuerySelect;
    let rows: Vec<String> = Entity::find()
        .select_only()
        .column(Column::Category)
        .distinct()
        .filter(Column::IsActive.eq(true))
        .into_tuple()
        .all(conn())
        .await?;
    let mut rows = rows;
    rows.sort();
    Ok(rows)
}
