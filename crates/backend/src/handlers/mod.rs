pub mod categories;
pub mod changes;
pub mod documents;
pub mod import;
pub mod inquiries;
pub mod products;
pub mod uploads;
