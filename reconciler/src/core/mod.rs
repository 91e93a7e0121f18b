pub mod client;
pub mod config;
pub mod error;

pub use client::{DatabaseClient, GatewayClient, LockClient};
