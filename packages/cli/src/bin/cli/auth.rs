// ABOUTME: Headless login and logout commands
// ABOUTME: Same token store as the terminal UI, without the captcha screen

use super::{api_client, login_service};
use colored::*;
use onboard_auth::AuthError;
use onboard_cli::Config;
use onboard_client::LoginRequest;
use tracing::debug;

pub async fn login_command(config: &Config, email: String, password: String) -> anyhow::Result<()> {
    let service = login_service(config, api_client(config)?);
    let request = LoginRequest::new(email.trim(), password);

    match service.login(&request).await {
        Ok(_) => {
            println!("{} {}", "✓ Logged in as".green().bold(), request.email);
            println!("{} {}", "Token stored in".cyan(), config.token_file.display());
            Ok(())
        }
        Err(e) => {
            debug!("Login failed: {}", e);
            Err(anyhow::anyhow!(e.user_message()))
        }
    }
}

pub async fn logout_command(config: &Config) -> anyhow::Result<()> {
    let service = login_service(config, api_client(config)?);

    match service.logout().await {
        Ok(()) => println!("{}", "✓ Logged out".green().bold()),
        Err(AuthError::TokenNotFound(_)) => println!("{}", "No stored session".yellow()),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
