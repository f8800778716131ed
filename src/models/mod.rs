pub mod api;
pub mod course;
pub mod schedule;
pub mod section;
pub mod user;
