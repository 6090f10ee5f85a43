pub mod bulk_import;
pub mod csv_import;
pub mod repository;
pub mod service;
