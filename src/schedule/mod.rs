pub mod aggregate;
pub mod grid;
