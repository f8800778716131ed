pub mod course;
pub mod user;

pub use course::validate_course;
pub use user::{validate_password_change, validate_profile};
