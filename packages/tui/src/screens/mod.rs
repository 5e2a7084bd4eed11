pub mod help;
pub mod login;
pub mod signup;

pub use help::{HelpScreen, Service};
pub use login::{LoginAction, LoginFocus, LoginScreen};
pub use signup::{SignupOutcome, SignupScreen};
