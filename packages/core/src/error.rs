// ABOUTME: Error types for the onboarding flow engine
// ABOUTME: Input rejections, picker outcomes, precondition violations and network failures

use thiserror::Error;

use crate::record::FieldKey;

pub type FlowResult<T> = Result<T, FlowError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Answer is empty")]
    EmptyInput,

    #[error("Answer for {field} failed validation")]
    ValidationFailed { field: FieldKey },

    #[error("Picker was cancelled")]
    PickerCancelled,

    #[error("Picker failed: {0}")]
    PickerFailed(String),

    #[error("Network failure during {operation}: {message}")]
    NetworkFailure { operation: String, message: String },

    #[error("Current step does not accept input")]
    NotAcceptingInput,

    #[error("Flow is not at the review step")]
    NotReviewing,

    #[error("A save is already in progress")]
    SaveInFlight,

    #[error("No save is in progress")]
    NoSaveInFlight,

    #[error("Invalid step table: {0}")]
    InvalidStepTable(String),
}

impl FlowError {
    /// Create a network failure for the named operation
    pub fn network(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Input errors are recovered locally by retrying the same step
    pub fn is_input_error(&self) -> bool {
        matches!(self, FlowError::EmptyInput | FlowError::ValidationFailed { .. })
    }
}
