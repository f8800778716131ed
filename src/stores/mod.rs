pub mod query_cache;
pub mod repository;
pub mod task;
