//! The onboarding state machine.
//!
//! `OnboardingFlow` owns the form record, the transcript and the transient
//! flow state of one chat screen. All transitions happen synchronously on a
//! single event; the only asynchronous operation is persisting the record,
//! which is either driven by the caller through [`Effect::Persist`] and
//! [`FlowEvent::SaveCompleted`] or awaited directly in
//! [`OnboardingFlow::finalize_and_save`].

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::constants::{
    CHOOSE_FIELD_MESSAGE, CLOSING_MESSAGE, DEFAULT_ERROR_CLEAR_DELAY, EMPTY_INPUT_MESSAGE,
    INVALID_INPUT_MESSAGE, RETURN_TO_REVIEW_MESSAGE, SAVED_MESSAGE, SAVE_FAILURE_BODY,
    SAVE_FAILURE_TITLE, SAVE_SUCCESS_BODY, SAVE_SUCCESS_TITLE,
};
use crate::error::{FlowError, FlowResult};
use crate::event::{Control, Effect, FlowEvent, PickOutcome, PickedFile};
use crate::record::{FieldKey, FormRecord};
use crate::step::{FileFilter, StepDefinition, StepKind, StepTable};
use crate::transcript::Transcript;
use crate::utils::{display_name_from_uri, format_date};

const SAVE_OPERATION: &str = "save-user-data";

/// Persistence collaborator for the completed record
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn save_record(&self, record: &FormRecord) -> FlowResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowMode {
    /// Walking the steps in order
    Linear,
    /// Detour to re-answer a single field
    EditingField(FieldKey),
    /// Sitting on the final review step
    Reviewing,
}

/// Transient validation message shown under the input
#[derive(Debug, Clone, PartialEq)]
pub struct PendingError {
    pub message: String,
    /// Matches the `ErrorTimerFired` event that may clear it
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct FlowState {
    pub current_step: usize,
    pub mode: FlowMode,
    pub pending_error: Option<PendingError>,
    pub input_buffer: String,
    pub choosing_field: bool,
    pub save_in_flight: bool,
    error_generation: u64,
}

impl FlowState {
    fn new() -> Self {
        Self {
            current_step: 0,
            mode: FlowMode::Linear,
            pending_error: None,
            input_buffer: String::new(),
            choosing_field: false,
            save_in_flight: false,
            error_generation: 0,
        }
    }
}

pub struct OnboardingFlow {
    steps: StepTable,
    record: FormRecord,
    transcript: Transcript,
    state: FlowState,
    error_clear_delay: Duration,
    today: Option<NaiveDate>,
    effects: Vec<Effect>,
}

impl OnboardingFlow {
    /// Start a fresh conversation at the first step
    pub fn new(steps: StepTable) -> Self {
        let mut flow = Self {
            steps,
            record: FormRecord::new(),
            transcript: Transcript::new(),
            state: FlowState::new(),
            error_clear_delay: DEFAULT_ERROR_CLEAR_DELAY,
            today: None,
            effects: Vec::new(),
        };

        if let Some(first) = flow.steps.get(0) {
            flow.transcript.push_bot(first.prompt.clone());
            if first.is_final() {
                flow.state.mode = FlowMode::Reviewing;
            }
        }

        flow
    }

    pub fn with_error_clear_delay(mut self, delay: Duration) -> Self {
        self.error_clear_delay = delay;
        self
    }

    /// Pin "today" for date rules instead of reading the local clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn steps(&self) -> &StepTable {
        &self.steps
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn mode(&self) -> &FlowMode {
        &self.state.mode
    }

    pub fn current_step_index(&self) -> usize {
        self.state.current_step
    }

    pub fn current_step(&self) -> Option<&StepDefinition> {
        self.steps.get(self.state.current_step)
    }

    pub fn pending_error(&self) -> Option<&PendingError> {
        self.state.pending_error.as_ref()
    }

    pub fn is_at_final(&self) -> bool {
        self.state.current_step == self.steps.final_index()
    }

    pub fn input(&self) -> &str {
        &self.state.input_buffer
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input_buffer = text.into();
    }

    /// Drain the effects requested since the last call
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Control the front-end should render for the current step
    pub fn current_control(&self) -> Control {
        if self.state.save_in_flight {
            return Control::Disabled;
        }

        let Some(step) = self.current_step() else {
            return Control::Disabled;
        };

        match &step.kind {
            StepKind::Text { .. } => Control::TextBox,
            StepKind::Menu { options } => Control::MenuButtons(options.clone()),
            StepKind::Date { rule } => Control::DatePicker {
                max: rule.map(|rule| rule.max_date(self.today())),
            },
            StepKind::Image => Control::FilePicker(FileFilter::Images),
            StepKind::Document => Control::FilePicker(FileFilter::Pdf),
            StepKind::Final => Control::Review {
                choosing_field: self.state.choosing_field,
            },
        }
    }

    /// Process one event to completion and return the requested effects
    pub fn handle(&mut self, event: FlowEvent) -> Vec<Effect> {
        let result = match event {
            FlowEvent::Submit(raw) => {
                self.set_input(raw);
                self.submit_input()
            }
            FlowEvent::MenuSelected(option) => self.complete_menu_selection(&option),
            FlowEvent::DatePicked(outcome) => self.complete_date_pick(outcome),
            FlowEvent::ImagePicked(outcome) => self.complete_image_pick(outcome),
            FlowEvent::DocumentPicked(outcome) => self.complete_document_pick(outcome),
            FlowEvent::RequestEdit => self.request_edit(),
            FlowEvent::BeginEdit(field) => self.begin_edit(field),
            FlowEvent::SaveRequested => self.begin_save(),
            FlowEvent::SaveCompleted(result) => self.complete_save(result),
            FlowEvent::ErrorTimerFired { generation } => {
                self.clear_error(generation);
                Ok(())
            }
        };

        if let Err(e) = result {
            match e {
                // Already logged by the picker adapter
                FlowError::PickerCancelled | FlowError::PickerFailed(_) => {}
                e if e.is_input_error() => debug!("Answer rejected: {}", e),
                e => warn!("Flow event not applied: {}", e),
            }
        }

        self.take_effects()
    }

    /// Submit whatever is in the input buffer
    pub fn submit_input(&mut self) -> FlowResult<()> {
        let raw = self.state.input_buffer.clone();
        self.submit_answer(&raw)
    }

    /// Validate and record an answer for the current step
    pub fn submit_answer(&mut self, raw: &str) -> FlowResult<()> {
        self.accept_answer(raw, raw)
    }

    pub fn complete_menu_selection(&mut self, option: &str) -> FlowResult<()> {
        self.expect_kind(|kind| matches!(kind, StepKind::Menu { .. }))?;
        self.accept_answer(option, option)
    }

    pub fn complete_date_pick(&mut self, outcome: PickOutcome<NaiveDate>) -> FlowResult<()> {
        let date = Self::picked(outcome, "date")?;
        self.expect_kind(|kind| matches!(kind, StepKind::Date { .. }))?;
        let formatted = format_date(date);
        self.accept_answer(&formatted, &formatted)
    }

    /// Image steps store the base64 content when the picker provides it
    pub fn complete_image_pick(&mut self, outcome: PickOutcome<PickedFile>) -> FlowResult<()> {
        let file = Self::picked(outcome, "image")?;
        self.expect_kind(|kind| matches!(kind, StepKind::Image))?;
        let display = file
            .name
            .clone()
            .or_else(|| display_name_from_uri(&file.uri))
            .unwrap_or_default();
        let stored = file.content.unwrap_or(file.uri);
        self.accept_answer(&display, &stored)
    }

    /// Document steps store the file URI
    pub fn complete_document_pick(&mut self, outcome: PickOutcome<PickedFile>) -> FlowResult<()> {
        let file = Self::picked(outcome, "document")?;
        self.expect_kind(|kind| matches!(kind, StepKind::Document))?;
        let display = file
            .name
            .clone()
            .or_else(|| display_name_from_uri(&file.uri))
            .unwrap_or_default();
        self.accept_answer(&display, &file.uri)
    }

    fn picked<T>(outcome: PickOutcome<T>, picker: &str) -> FlowResult<T> {
        match outcome {
            PickOutcome::Picked(value) => Ok(value),
            PickOutcome::Cancelled => {
                warn!("{} picker cancelled", picker);
                Err(FlowError::PickerCancelled)
            }
            PickOutcome::Failed(message) => {
                warn!("{} picker failed: {}", picker, message);
                Err(FlowError::PickerFailed(message))
            }
        }
    }

    fn expect_kind(&self, predicate: impl Fn(&StepKind) -> bool) -> FlowResult<()> {
        match self.current_step() {
            Some(step) if predicate(&step.kind) => Ok(()),
            _ => Err(FlowError::NotAcceptingInput),
        }
    }

    /// Shared acceptance path: `display` goes to the transcript and the
    /// validators, `stored` goes into the record.
    fn accept_answer(&mut self, display: &str, stored: &str) -> FlowResult<()> {
        if self.state.mode == FlowMode::Reviewing {
            return Err(FlowError::NotAcceptingInput);
        }
        let index = self.state.current_step;
        let (field, accepted) = match self.steps.get(index) {
            Some(step) if !step.is_final() => match step.field {
                Some(field) => (field, step.accepts(display, self.today())),
                None => return Err(FlowError::NotAcceptingInput),
            },
            _ => return Err(FlowError::NotAcceptingInput),
        };

        if display.trim().is_empty() {
            return Err(self.reject(EMPTY_INPUT_MESSAGE, FlowError::EmptyInput));
        }
        if !accepted {
            return Err(self.reject(
                INVALID_INPUT_MESSAGE,
                FlowError::ValidationFailed { field },
            ));
        }

        self.record.set(field, stored);
        self.state.input_buffer.clear();
        self.state.pending_error = None;
        self.transcript.push_user(display);

        if let FlowMode::EditingField(edited) = self.state.mode {
            info!("Field {} updated from review", edited);
            self.transcript.push_bot(RETURN_TO_REVIEW_MESSAGE);
            self.enter_review();
        } else {
            info!("Step {} answered ({})", index, field);
            let next = index + 1;
            match self.steps.get(next) {
                Some(step) if !step.is_final() => {
                    self.transcript.push_bot(step.prompt.clone());
                    self.state.current_step = next;
                }
                _ => {
                    self.transcript.push_bot(CLOSING_MESSAGE);
                    self.enter_review();
                }
            }
        }

        debug!(
            "Flow now at step {} in {:?}",
            self.state.current_step, self.state.mode
        );
        Ok(())
    }

    fn reject(&mut self, message: &str, error: FlowError) -> FlowError {
        warn!("Rejected answer at step {}: {}", self.state.current_step, error);
        self.state.error_generation += 1;
        let generation = self.state.error_generation;
        self.state.pending_error = Some(PendingError {
            message: message.to_string(),
            generation,
        });
        self.effects.push(Effect::Shake);
        self.effects.push(Effect::ScheduleErrorClear {
            generation,
            after: self.error_clear_delay,
        });
        error
    }

    fn enter_review(&mut self) {
        self.state.mode = FlowMode::Reviewing;
        self.state.current_step = self.steps.final_index();
        self.state.choosing_field = false;
    }

    /// Clear the pending error if it is the one the timer was set for
    pub fn clear_error(&mut self, generation: u64) {
        if self
            .state
            .pending_error
            .as_ref()
            .is_some_and(|pending| pending.generation == generation)
        {
            self.state.pending_error = None;
        }
    }

    /// "Edit Information": ask which field to revisit
    pub fn request_edit(&mut self) -> FlowResult<()> {
        if self.state.mode != FlowMode::Reviewing || self.state.save_in_flight {
            return Err(FlowError::NotReviewing);
        }
        self.transcript.push_bot(CHOOSE_FIELD_MESSAGE);
        self.state.choosing_field = true;
        Ok(())
    }

    /// Fields offered as edit buttons on the review step
    pub fn editable_fields(&self) -> Vec<FieldKey> {
        self.steps.editable_fields()
    }

    /// Jump back to the step that collects `field`
    pub fn begin_edit(&mut self, field: FieldKey) -> FlowResult<()> {
        if self.state.mode != FlowMode::Reviewing || self.state.save_in_flight {
            return Err(FlowError::NotReviewing);
        }
        let Some(index) = self.steps.position_of(field) else {
            debug!("No step collects {}, ignoring edit", field);
            return Ok(());
        };
        let prompt = self.steps.get(index).map(|step| step.prompt.clone()).unwrap_or_default();

        self.transcript
            .push_bot(format!("You are editing your {}. {}", field, prompt));
        self.state.mode = FlowMode::EditingField(field);
        self.state.current_step = index;
        self.state.choosing_field = false;
        self.state.input_buffer.clear();
        info!("Editing {}", field);
        Ok(())
    }

    fn prepare_save(&mut self) -> FlowResult<FormRecord> {
        if !self.is_at_final() {
            return Err(FlowError::NotReviewing);
        }
        if self.state.save_in_flight {
            return Err(FlowError::SaveInFlight);
        }
        self.state.save_in_flight = true;
        Ok(self.record.clone())
    }

    /// Request persistence through [`Effect::Persist`]
    pub fn begin_save(&mut self) -> FlowResult<()> {
        let record = self.prepare_save()?;
        self.effects.push(Effect::Persist(record));
        Ok(())
    }

    /// Apply the single outcome of a save request
    pub fn complete_save(&mut self, result: Result<(), String>) -> FlowResult<()> {
        if !self.state.save_in_flight {
            return Err(FlowError::NoSaveInFlight);
        }
        self.state.save_in_flight = false;
        match result {
            Ok(()) => {
                info!("Record saved");
                self.transcript.push_bot(SAVED_MESSAGE);
                self.enter_review();
                self.effects.push(Effect::Alert {
                    title: SAVE_SUCCESS_TITLE.to_string(),
                    message: SAVE_SUCCESS_BODY.to_string(),
                });
                Ok(())
            }
            Err(message) => {
                error!("Error saving user data: {}", message);
                self.effects.push(Effect::Alert {
                    title: SAVE_FAILURE_TITLE.to_string(),
                    message: SAVE_FAILURE_BODY.to_string(),
                });
                Err(FlowError::network(SAVE_OPERATION, message))
            }
        }
    }

    /// Persist the record through `sink` and apply the outcome
    pub async fn finalize_and_save(&mut self, sink: &dyn RecordSink) -> FlowResult<()> {
        let record = self.prepare_save()?;
        let result = sink.save_record(&record).await.map_err(|e| e.to_string());
        self.complete_save(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::default_steps;

    fn flow() -> OnboardingFlow {
        OnboardingFlow::new(default_steps(18))
            .with_today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    #[test]
    fn test_starts_with_first_prompt() {
        let flow = flow();
        assert_eq!(flow.current_step_index(), 0);
        assert_eq!(flow.mode(), &FlowMode::Linear);
        assert_eq!(flow.transcript().texts(), vec!["Welcome! Please tell me your name."]);
        assert_eq!(flow.current_control(), Control::TextBox);
    }

    #[test]
    fn test_rejection_requests_shake_and_timer() {
        let mut flow = flow();
        let effects = flow.handle(FlowEvent::Submit("   ".to_string()));

        assert_eq!(
            effects,
            vec![
                Effect::Shake,
                Effect::ScheduleErrorClear {
                    generation: 1,
                    after: DEFAULT_ERROR_CLEAR_DELAY
                }
            ]
        );
        assert_eq!(flow.pending_error().unwrap().message, EMPTY_INPUT_MESSAGE);
        assert_eq!(flow.current_step_index(), 0);
        assert!(flow.record().is_empty());
    }

    #[test]
    fn test_new_error_resets_timer() {
        let mut flow = flow();
        flow.submit_answer("").unwrap_err();
        flow.submit_answer(" ").unwrap_err();
        assert_eq!(flow.pending_error().unwrap().generation, 2);

        // Stale timer from the first rejection does nothing
        flow.handle(FlowEvent::ErrorTimerFired { generation: 1 });
        assert!(flow.pending_error().is_some());

        flow.handle(FlowEvent::ErrorTimerFired { generation: 2 });
        assert!(flow.pending_error().is_none());
    }

    #[test]
    fn test_accept_clears_input_buffer() {
        let mut flow = flow();
        flow.set_input("Alice");
        flow.submit_input().unwrap();
        assert_eq!(flow.input(), "");
        assert_eq!(flow.record().get(FieldKey::Name), Some("Alice"));
        assert_eq!(
            flow.current_control(),
            Control::MenuButtons(vec![
                "B.Tech".to_string(),
                "B.E".to_string(),
                "B.Sc".to_string(),
                "M.Tech".to_string(),
                "M.Sc".to_string()
            ])
        );
    }

    #[test]
    fn test_menu_selection_on_text_step_is_refused() {
        let mut flow = flow();
        assert_eq!(
            flow.complete_menu_selection("B.Tech"),
            Err(FlowError::NotAcceptingInput)
        );
        assert!(flow.record().is_empty());
    }

    #[test]
    fn test_date_control_carries_max_date() {
        let mut flow = flow();
        flow.submit_answer("Alice").unwrap();
        flow.complete_menu_selection("B.E").unwrap();
        flow.submit_answer("9876543210").unwrap();

        assert_eq!(
            flow.current_control(),
            Control::DatePicker {
                max: NaiveDate::from_ymd_opt(2006, 6, 15)
            }
        );

        let too_young = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        assert!(matches!(
            flow.complete_date_pick(PickOutcome::Picked(too_young)),
            Err(FlowError::ValidationFailed { field: FieldKey::Dob })
        ));

        let adult = NaiveDate::from_ymd_opt(2001, 1, 2).unwrap();
        flow.complete_date_pick(PickOutcome::Picked(adult)).unwrap();
        assert_eq!(flow.record().get(FieldKey::Dob), Some("Tue Jan 02 2001"));
    }

    #[test]
    fn test_cancelled_picker_is_silent() {
        let mut flow = flow();
        let effects = flow.handle(FlowEvent::DatePicked(PickOutcome::Cancelled));
        assert!(effects.is_empty());
        assert!(flow.pending_error().is_none());
        assert_eq!(flow.transcript().len(), 1);
    }

    #[test]
    fn test_begin_edit_requires_review() {
        let mut flow = flow();
        assert_eq!(flow.begin_edit(FieldKey::Name), Err(FlowError::NotReviewing));
        assert_eq!(flow.request_edit(), Err(FlowError::NotReviewing));
    }

    #[test]
    fn test_save_requires_final_step() {
        let mut flow = flow();
        assert_eq!(flow.begin_save(), Err(FlowError::NotReviewing));
        assert!(flow.take_effects().is_empty());
    }
}
