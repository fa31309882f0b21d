pub mod cache;
pub mod models;
pub mod order_repo;
