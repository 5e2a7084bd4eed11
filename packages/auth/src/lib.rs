// ABOUTME: Authentication library for the onboarding app
// ABOUTME: Captcha-guarded credential login with a file-backed token store

pub mod captcha;
pub mod error;
pub mod login;
pub mod session;
pub mod storage;

// Re-export main types
pub use captcha::{Captcha, CAPTCHA_LENGTH};
pub use error::{AuthError, AuthResult};
pub use login::{LoginForm, LoginService, LOGIN_ERROR_DISPLAY};
pub use session::AuthSession;
pub use storage::{default_token_file, FileTokenStore, TokenStore, AUTH_TOKEN_KEY};
