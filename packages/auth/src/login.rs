//! Login screen state and the login call itself.

use onboard_client::{ApiClient, LoginRequest};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::captcha::Captcha;
use crate::error::{AuthError, AuthResult, CAPTCHA_NOTICE};
use crate::storage::{TokenStore, AUTH_TOKEN_KEY};

/// How long a login failure notice stays visible
pub const LOGIN_ERROR_DISPLAY: Duration = Duration::from_secs(120);

/// Editable state of the login form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    captcha: Captcha,
    entered_captcha: String,
    captcha_valid: bool,
    error_message: Option<String>,
    error_shown_at: Option<Instant>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    /// Fresh form with a newly generated challenge
    pub fn new() -> Self {
        Self::with_captcha(Captcha::generate())
    }

    pub fn with_captcha(captcha: Captcha) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            captcha,
            entered_captcha: String::new(),
            captcha_valid: true,
            error_message: None,
            error_shown_at: None,
        }
    }

    pub fn captcha(&self) -> &Captcha {
        &self.captcha
    }

    pub fn entered_captcha(&self) -> &str {
        &self.entered_captcha
    }

    pub fn refresh_captcha(&mut self) {
        self.captcha = Captcha::generate();
    }

    /// Update the typed challenge and re-check it as the user types
    pub fn set_entered_captcha(&mut self, text: impl Into<String>) {
        self.entered_captcha = text.into();
        if self.captcha.matches(&self.entered_captcha) {
            self.captcha_valid = true;
            self.error_message = None;
        } else {
            self.captcha_valid = false;
            self.error_message = Some(CAPTCHA_NOTICE.to_string());
        }
    }

    pub fn is_captcha_valid(&self) -> bool {
        self.captcha_valid
    }

    /// Gate run before any network call
    pub fn check_captcha(&mut self) -> AuthResult<()> {
        if self.captcha.matches(&self.entered_captcha) {
            Ok(())
        } else {
            warn!("Login blocked by captcha mismatch");
            self.captcha_valid = false;
            self.show_error(CAPTCHA_NOTICE, Instant::now());
            Err(AuthError::CaptchaMismatch)
        }
    }

    pub fn request(&self) -> LoginRequest {
        LoginRequest::new(self.email.clone(), self.password.clone())
    }

    pub fn show_error(&mut self, message: impl Into<String>, now: Instant) {
        self.error_message = Some(message.into());
        self.error_shown_at = Some(now);
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Hide a failure notice once it has been visible long enough
    pub fn expire_error(&mut self, now: Instant) -> bool {
        match self.error_shown_at {
            Some(shown) if now.duration_since(shown) >= LOGIN_ERROR_DISPLAY => {
                self.error_message = None;
                self.error_shown_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Performs the login call and stores the resulting token
#[derive(Clone)]
pub struct LoginService {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
}

impl LoginService {
    pub fn new(client: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self { client, store }
    }

    /// Log in and persist the token under [`AUTH_TOKEN_KEY`]
    pub async fn login(&self, request: &LoginRequest) -> AuthResult<String> {
        let response = self.client.login(request).await.map_err(|e| {
            error!("Login error: {}", e);
            AuthError::LoginFailed(e)
        })?;

        self.store.set_item(AUTH_TOKEN_KEY, &response.token).await?;
        info!("Stored auth token for {}", request.email);
        Ok(response.token)
    }

    pub async fn stored_token(&self) -> AuthResult<Option<String>> {
        self.store.get_item(AUTH_TOKEN_KEY).await
    }

    pub async fn logout(&self) -> AuthResult<()> {
        self.store.remove_item(AUTH_TOKEN_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_captcha_check() {
        let mut form = LoginForm::with_captcha(Captcha::from_code("Ab12"));
        assert!(form.is_captcha_valid());

        form.set_entered_captcha("Ab1");
        assert!(!form.is_captcha_valid());
        assert_eq!(form.error_message(), Some("Incorrect CAPTCHA"));

        form.set_entered_captcha("Ab12");
        assert!(form.is_captcha_valid());
        assert_eq!(form.error_message(), None);
        assert!(form.check_captcha().is_ok());
    }

    #[test]
    fn test_check_captcha_blocks_login() {
        let mut form = LoginForm::with_captcha(Captcha::from_code("Ab12"));
        form.set_entered_captcha("zzzz");

        assert!(matches!(form.check_captcha(), Err(AuthError::CaptchaMismatch)));
        assert!(!form.is_captcha_valid());
    }

    #[test]
    fn test_error_expires_after_two_minutes() {
        let mut form = LoginForm::new();
        let shown = Instant::now();
        form.show_error("Error in Login", shown);

        assert!(!form.expire_error(shown + Duration::from_secs(60)));
        assert_eq!(form.error_message(), Some("Error in Login"));

        assert!(form.expire_error(shown + LOGIN_ERROR_DISPLAY));
        assert_eq!(form.error_message(), None);
    }

    #[test]
    fn test_refresh_keeps_length() {
        let mut form = LoginForm::new();
        form.refresh_captcha();
        assert_eq!(form.captcha().code().len(), crate::CAPTCHA_LENGTH);
    }
}
