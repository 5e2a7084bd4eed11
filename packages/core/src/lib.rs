// ABOUTME: Conversational onboarding engine shared by every Onboard front-end
// ABOUTME: Step table, form record, transcript and the state machine that walks them

pub mod constants;
pub mod error;
pub mod event;
pub mod flow;
pub mod record;
pub mod step;
pub mod transcript;
pub mod utils;

// Re-export main types
pub use error::{FlowError, FlowResult};
pub use event::{Control, Effect, FlowEvent, PickOutcome, PickedFile};
pub use flow::{FlowMode, FlowState, OnboardingFlow, PendingError, RecordSink};
pub use record::{FieldKey, FormRecord};
pub use step::{default_steps, DateRule, FileFilter, StepDefinition, StepKind, StepTable, Validator};
pub use transcript::{Message, Role, Transcript};

// Re-export utilities
pub use utils::{display_name_from_uri, format_date};
