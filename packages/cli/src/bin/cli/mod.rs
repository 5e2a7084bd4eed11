pub mod auth;
pub mod steps;
pub mod tui;

use onboard_auth::{FileTokenStore, LoginService};
use onboard_cli::Config;
use onboard_client::ApiClient;
use std::sync::Arc;

pub fn api_client(config: &Config) -> anyhow::Result<ApiClient> {
    Ok(ApiClient::with_timeout(&config.api_base_url, config.http_timeout)?)
}

pub fn login_service(config: &Config, client: ApiClient) -> LoginService {
    let store = Arc::new(FileTokenStore::new(config.token_file.clone()));
    LoginService::new(client, store)
}
