/// Who is currently logged in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    user: Option<String>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login_success(&mut self, user: impl Into<String>) {
        self.user = Some(user.into());
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_and_logout() {
        let mut session = AuthSession::new();
        assert!(!session.is_authenticated());

        session.login_success("a@b.com");
        assert!(session.is_authenticated());
        assert_eq!(session.user(), Some("a@b.com"));

        session.logout();
        assert_eq!(session, AuthSession::default());
    }
}
