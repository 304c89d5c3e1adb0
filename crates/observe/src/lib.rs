//! This crate contains the initialization logic for logging that is shared
//! by everything embedding the escrow client.
pub mod config;
pub mod tracing;

pub use config::Config;
