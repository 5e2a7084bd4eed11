use rand::{distributions::Alphanumeric, Rng};

pub const CAPTCHA_LENGTH: usize = 4;

/// Text challenge shown next to the login form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captcha {
    code: String,
}

impl Captcha {
    /// Generate a random challenge of the default length
    pub fn generate() -> Self {
        Self::with_length(CAPTCHA_LENGTH)
    }

    pub fn with_length(length: usize) -> Self {
        let code = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect();
        Self { code }
    }

    /// Fixed challenge, for tests and replays
    pub fn from_code(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Case-sensitive exact comparison
    pub fn matches(&self, entered: &str) -> bool {
        self.code == entered
    }
}
