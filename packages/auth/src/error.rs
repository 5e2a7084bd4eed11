// ABOUTME: Error types for login and token storage
// ABOUTME: Maps every failure onto the short notice shown on the login screen

use onboard_client::ClientError;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

pub const LOGIN_FAILED_NOTICE: &str = "Error in Login";
pub const CAPTCHA_NOTICE: &str = "Incorrect CAPTCHA";
pub const UNEXPECTED_NOTICE: &str = "An unexpected error occurred";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Captcha does not match")]
    CaptchaMismatch,

    #[error("Login failed: {0}")]
    LoginFailed(#[from] ClientError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Token not found: {0}")]
    TokenNotFound(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthError {
    /// Notice displayed on the login screen
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::CaptchaMismatch => CAPTCHA_NOTICE,
            AuthError::LoginFailed(_) => LOGIN_FAILED_NOTICE,
            _ => UNEXPECTED_NOTICE,
        }
    }
}
