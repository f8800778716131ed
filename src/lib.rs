pub mod api;
pub mod core;
pub mod dashboard;
pub mod handlers;
pub mod models;
pub mod schedule;
pub mod stores;
pub mod table;
pub mod utils;
pub mod validation;
