use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    New,
    InProgress,
    Resolved,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::InProgress => "in_progress",
            InquiryStatus::Resolved => "resolved",
            InquiryStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(InquiryStatus::New),
            "in_progress" => Some(InquiryStatus::InProgress),
            "resolved" => Some(InquiryStatus::Resolved),
            "closed" => Some(InquiryStatus::Closed),
            _ => None,
        }
    }
}

/// Contact-a-dealer request attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInquiry {
    pub id: String,
    pub product_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub status: InquiryStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryDto {
    pub product_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}
