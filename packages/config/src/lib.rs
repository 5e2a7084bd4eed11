// ABOUTME: Shared configuration names for the Onboard workspace
// ABOUTME: Environment variable keys plus the defaults applied when they are unset

pub mod constants;
pub mod defaults;

pub use constants::*;
pub use defaults::*;
