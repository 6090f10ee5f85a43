pub mod changes;
pub mod config;
pub mod data;
pub mod storage;
