use contracts::domain::document::Document;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub file_type: String,
    pub category: String,
    pub is_active: bool,
    pub uploaded_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Document {
    fn from(m: Model) -> Self {
        Document {
            id: m.id,
            title: m.title,
            description: m.description,
            file_name: m.file_name,
            file_url: m.file_url,
            file_size: m.file_size,
            file_type: m.file_type,
            category: m.category,
            is_active: m.is_active,
            uploaded_by: m.uploaded_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Storefront listing: active documents, newest first.
pub async fn list_active() -> anyhow::Result<Vec<Document>> {
    let items = Entity::find()
        .filter(Column::IsActive.eq(true))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Back-office listing: inactive documents included.
pub async fn list_all() -> anyhow::Result<Vec<Document>> {
    let items = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<Document>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(document: &Document) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(document.id.clone()),
        title: Set(document.title.clone()),
        description: Set(document.description.clone()),
        file_name: Set(document.file_name.clone()),
        file_url: Set(document.file_url.clone()),
        file_size: Set(document.file_size),
        file_type: Set(document.file_type.clone()),
        category: Set(document.category.clone()),
        is_active: Set(document.is_active),
        uploaded_by: Set(document.uploaded_by.clone()),
        created_at: Set(document.created_at.clone()),
        updated_at: Set(document.updated_at.clone()),
    };
    active.insert(conn()).await?;
    Ok(())
}

pub async fn set_active(id: &str, is_active: bool) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsActive, Expr::value(is_active))
        .col_expr(
            Column::UpdatedAt,
            Expr::value(chrono::Utc::now().to_rfc3339()),
        )
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn delete(id: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
