//! Onboard TUI - terminal front-end for the onboarding conversation
//!
//! Splash, login and signup screens lead into a tabbed home view whose
//! Chat tab drives an [`onboard_core::OnboardingFlow`], built with ratatui.

pub mod app;
pub mod date_picker;
pub mod events;
pub mod file_picker;
pub mod input;
pub mod screens;
pub mod state;
pub mod ui;

pub use app::{App, AppServices};
pub use events::{AppEvent, EventHandler};
pub use state::{AppOptions, AppState, HomeTab, Screen};
