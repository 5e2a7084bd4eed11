// ABOUTME: HTTP client for the two calls the onboarding app makes
// ABOUTME: Credential login and persisting the completed onboarding record

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use error::{ClientError, ClientResult};
pub use types::{ErrorBody, LoginRequest, LoginResponse};
