pub mod categories;
pub mod documents;
pub mod inquiries;
pub mod products;
