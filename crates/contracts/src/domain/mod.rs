pub mod category;
pub mod document;
pub mod import;
pub mod inquiry;
pub mod product;
