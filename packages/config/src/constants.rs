// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of every environment variable Onboard reads

// API Configuration
pub const ONBOARD_API_BASE_URL: &str = "ONBOARD_API_BASE_URL";
pub const ONBOARD_HTTP_TIMEOUT_SECS: &str = "ONBOARD_HTTP_TIMEOUT_SECS";

// Local Files
pub const ONBOARD_TOKEN_FILE: &str = "ONBOARD_TOKEN_FILE";
pub const ONBOARD_LOG_FILE: &str = "ONBOARD_LOG_FILE";

// Conversation Behaviour
pub const ONBOARD_ERROR_CLEAR_MS: &str = "ONBOARD_ERROR_CLEAR_MS";
pub const ONBOARD_MINIMUM_AGE_YEARS: &str = "ONBOARD_MINIMUM_AGE_YEARS";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// System Environment Variables
pub const HOME: &str = "HOME";
pub const USERPROFILE: &str = "USERPROFILE"; // Windows
