// ABOUTME: Fixed bot texts and timing defaults of the onboarding conversation
// ABOUTME: Shared by the flow engine and the front-ends that render alerts

use std::time::Duration;

/// Shown when the answer is empty or whitespace only
pub const EMPTY_INPUT_MESSAGE: &str = "Please fill the field.";

/// Shown when a step validator rejects the answer
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input, please try again.";

pub const CLOSING_MESSAGE: &str = "All set! You can now review and save your information.";
pub const RETURN_TO_REVIEW_MESSAGE: &str = "You can now review and save your information.";
pub const CHOOSE_FIELD_MESSAGE: &str = "Which field would you like to edit?";
pub const SAVED_MESSAGE: &str = "Information saved!";

pub const SAVE_SUCCESS_TITLE: &str = "Success";
pub const SAVE_SUCCESS_BODY: &str = "Your details are saved successfully.";
pub const SAVE_FAILURE_TITLE: &str = "Error";
pub const SAVE_FAILURE_BODY: &str =
    "There was an error saving your information. Please try again.";

/// Delay before a pending validation error clears itself
pub const DEFAULT_ERROR_CLEAR_DELAY: Duration = Duration::from_millis(2000);

/// Display format of accepted dates (`Tue Jan 02 2001`)
pub const DATE_DISPLAY_FORMAT: &str = "%a %b %d %Y";
