pub mod auth;
#[cfg(feature = "client")]
pub mod client;
pub mod objects;
