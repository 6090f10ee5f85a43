use contracts::domain::inquiry::{InquiryStatus, ProductInquiry};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_inquiries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProductInquiry {
    fn from(m: Model) -> Self {
        ProductInquiry {
            id: m.id,
            product_id: m.product_id,
            customer_name: m.customer_name,
            customer_email: m.customer_email,
            customer_phone: m.customer_phone,
            company: m.company,
            message: m.message,
            status: InquiryStatus::parse(&m.status).unwrap_or(InquiryStatus::New),
            created_at: m.created_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<ProductInquiry>> {
    let items = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert(inquiry: &ProductInquiry) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(inquiry.id.clone()),
        product_id: Set(inquiry.product_id.clone()),
        customer_name: Set(inquiry.customer_name.clone()),
        customer_email: Set(inquiry.customer_email.clone()),
        customer_phone: Set(inquiry.customer_phone.clone()),
        company: Set(inquiry.company.clone()),
        message: Set(inquiry.message.clone()),
        status: Set(inquiry.status.as_str().to_string()),
        created_at: Set(inquiry.created_at.clone()),
    };
    active.insert(conn()).await?;
    Ok(())
}

pub async fn set_status(id: &str, status: InquiryStatus) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(status.as_str().to_string()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
