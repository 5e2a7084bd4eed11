// ABOUTME: Shared pieces of the onboard binary
// ABOUTME: Environment configuration and tracing setup

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError};
