//! Values used when the matching variable is unset.

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ERROR_CLEAR_MS: u64 = 2000;
/// 0 turns the date-of-birth age check off
pub const DEFAULT_MINIMUM_AGE_YEARS: u32 = 18;
pub const DEFAULT_LOG_FILTER: &str = "onboard=info";

/// Directory under the home directory holding the token and log files
pub const DATA_DIR_NAME: &str = ".onboard";
pub const TOKEN_FILE_NAME: &str = "token.json";
pub const LOG_FILE_NAME: &str = "onboard.log";
