pub mod debounce;
pub mod live;
pub mod query;
pub mod tables;
