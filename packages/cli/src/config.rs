use onboard_config::constants::{
    HOME, ONBOARD_API_BASE_URL, ONBOARD_ERROR_CLEAR_MS, ONBOARD_HTTP_TIMEOUT_SECS,
    ONBOARD_LOG_FILE, ONBOARD_MINIMUM_AGE_YEARS, ONBOARD_TOKEN_FILE, USERPROFILE,
};
use onboard_config::defaults::{
    DATA_DIR_NAME, DEFAULT_API_BASE_URL, DEFAULT_ERROR_CLEAR_MS, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_MINIMUM_AGE_YEARS, LOG_FILE_NAME, TOKEN_FILE_NAME,
};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid number in {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),
    #[error("Could not determine the home directory")]
    MissingHomeDirectory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub http_timeout: Duration,
    pub token_file: PathBuf,
    pub log_file: PathBuf,
    pub error_clear_delay: Duration,
    /// 0 disables the date-of-birth age check
    pub minimum_age_years: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url =
            env::var(ONBOARD_API_BASE_URL).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        validate_base_url(&api_base_url)?;

        let timeout_secs = parse_number(ONBOARD_HTTP_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber {
                var: ONBOARD_HTTP_TIMEOUT_SECS,
                value: timeout_secs.to_string(),
            });
        }

        let error_clear_ms = parse_number(ONBOARD_ERROR_CLEAR_MS, DEFAULT_ERROR_CLEAR_MS)?;
        let minimum_age_years = parse_number(ONBOARD_MINIMUM_AGE_YEARS, DEFAULT_MINIMUM_AGE_YEARS)?;

        let token_file = path_or_default(ONBOARD_TOKEN_FILE, TOKEN_FILE_NAME)?;
        let log_file = path_or_default(ONBOARD_LOG_FILE, LOG_FILE_NAME)?;

        Ok(Config {
            api_base_url,
            http_timeout: Duration::from_secs(timeout_secs),
            token_file,
            log_file,
            error_clear_delay: Duration::from_millis(error_clear_ms),
            minimum_age_years,
        })
    }
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidUrl(raw.to_string())),
    }
}

fn parse_number<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        _ => Ok(default),
    }
}

fn path_or_default(var: &'static str, file_name: &str) -> Result<PathBuf, ConfigError> {
    match env::var(var) {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(data_dir()?.join(file_name)),
    }
}

/// `~/.onboard`, honouring HOME and USERPROFILE before the platform lookup
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let home = env::var(HOME)
        .or_else(|_| env::var(USERPROFILE))
        .ok()
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .ok_or(ConfigError::MissingHomeDirectory)?;
    Ok(home.join(DATA_DIR_NAME))
}
