pub mod client;
pub mod credentials;
#[cfg(test)]
pub mod memory;
