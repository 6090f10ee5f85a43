use chrono::Utc;
use contracts::domain::inquiry::{InquiryDto, InquiryStatus, ProductInquiry};

use super::repository;

pub async fn create(dto: InquiryDto) -> anyhow::Result<ProductInquiry> {
    if dto.customer_name.trim().is_empty() {
        anyhow::bail!("Customer name is required");
    }
    if !dto.customer_email.contains('@') {
        anyhow::bail!("Invalid email address");
    }

    let inquiry = ProductInquiry {
        id: uuid::Uuid::new_v4().to_string(),
        product_id: dto.product_id,
        customer_name: dto.customer_name.trim().to_string(),
        customer_email: dto.customer_email.trim().to_string(),
        customer_phone: dto.customer_phone.filter(|p| !p.trim().is_empty()),
        company: dto.company.filter(|c| !c.trim().is_empty()),
        message: dto.message.filter(|m| !m.trim().is_empty()),
        status: InquiryStatus::New,
        created_at: Utc::now().to_rfc3339(),
    };
    repository::insert(&inquiry).await?;
    Ok(inquiry)
}

pub async fn set_status(id: &str, status: InquiryStatus) -> anyhow::Result<bool> {
    repository::set_status(id, status).await
}

pub async fn list_all() -> anyhow::Result<Vec<ProductInquiry>> {
    repository::list_all().await
}
