use async_trait::async_trait;
use chrono::NaiveDate;
use onboard_core::{
    default_steps, Effect, FieldKey, FileFilter, FlowError, FlowEvent, FlowMode, FlowResult, FormRecord,
    OnboardingFlow, PickOutcome, PickedFile, RecordSink, StepDefinition, StepTable, Validator,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Mutex;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn short_table() -> StepTable {
    StepTable::new(vec![
        StepDefinition::text(FieldKey::Name, "What is your name?"),
        StepDefinition::menu(
            FieldKey::Qualification,
            "What is your qualification?",
            ["B.Tech", "B.E"],
        ),
        StepDefinition::validated_text(
            FieldKey::Phone,
            "Enter your phone number.",
            Validator::Digits(10),
        ),
        StepDefinition::final_step("Review your answers."),
    ])
    .unwrap()
}

/// Walk the default table to the review step
fn completed_flow() -> OnboardingFlow {
    let mut flow = OnboardingFlow::new(default_steps(18)).with_today(today());
    flow.submit_answer("Alice").unwrap();
    flow.complete_menu_selection("M.Sc").unwrap();
    flow.submit_answer("9876543210").unwrap();
    flow.complete_date_pick(PickOutcome::Picked(
        NaiveDate::from_ymd_opt(1995, 3, 4).unwrap(),
    ))
    .unwrap();
    flow.submit_answer("I like building things.").unwrap();
    flow.submit_answer("Rust, SQL").unwrap();
    flow.complete_image_pick(PickOutcome::Picked(
        PickedFile::new("file:///tmp/me.png")
            .with_name("me.png")
            .with_content("aW1hZ2U="),
    ))
    .unwrap();
    flow.complete_document_pick(PickOutcome::Picked(PickedFile::new(
        "file:///tmp/docs/cv.pdf",
    )))
    .unwrap();
    flow
}

#[derive(Default)]
struct RecordingSink {
    saved: Mutex<Vec<FormRecord>>,
    fail: bool,
}

#[async_trait]
impl RecordSink for RecordingSink {
    async fn save_record(&self, record: &FormRecord) -> FlowResult<()> {
        if self.fail {
            return Err(FlowError::network("save-user-data", "connection refused"));
        }
        self.saved.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[rstest]
#[case("")]
#[case(" ")]
#[case("\t\n  ")]
fn test_blank_answers_never_advance(#[case] raw: &str) {
    let mut flow = OnboardingFlow::new(default_steps(18)).with_today(today());

    for _ in 0..6 {
        let before = flow.current_step_index();
        assert_eq!(flow.submit_answer(raw), Err(FlowError::EmptyInput));
        assert_eq!(flow.current_step_index(), before);
        assert!(flow.record().is_empty());

        // Move on with a real answer for whichever control is showing
        match flow.current_step_index() {
            1 => flow.complete_menu_selection("B.Sc").unwrap(),
            2 => flow.submit_answer("0123456789").unwrap(),
            3 => flow
                .complete_date_pick(PickOutcome::Picked(
                    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                ))
                .unwrap(),
            _ => flow.submit_answer("ok").unwrap(),
        }
        let filled = flow.record().clone();

        let _ = flow.submit_answer(raw);
        assert_eq!(flow.record(), &filled);
    }
}

#[rstest]
#[case("9876543210", true)]
#[case("1234567890", true)]
#[case("12345", false)]
#[case("123456789012", false)]
#[case("98765-43210", false)]
#[case("abcdefghij", false)]
fn test_phone_step_accepts_exactly_ten_digits(#[case] raw: &str, #[case] accepted: bool) {
    let mut flow = OnboardingFlow::new(short_table());
    flow.submit_answer("Alice").unwrap();
    flow.complete_menu_selection("B.E").unwrap();

    let result = flow.submit_answer(raw);
    assert_eq!(result.is_ok(), accepted);
    if !accepted {
        assert_eq!(
            result,
            Err(FlowError::ValidationFailed {
                field: FieldKey::Phone
            })
        );
        assert_eq!(
            flow.pending_error().unwrap().message,
            "Invalid input, please try again."
        );
        assert_eq!(flow.record().get(FieldKey::Phone), None);
    }
}

#[test]
fn test_valid_answer_appends_user_then_next_prompt() {
    let steps = default_steps(18);
    let mut flow = OnboardingFlow::new(steps.clone()).with_today(today());

    flow.submit_answer("Alice").unwrap();
    assert_eq!(flow.current_step_index(), 1);
    assert_eq!(
        flow.transcript().texts(),
        vec![
            "Welcome! Please tell me your name.",
            "Alice",
            "What is your qualification?"
        ]
    );

    flow.complete_menu_selection("B.Tech").unwrap();
    assert_eq!(flow.current_step_index(), 2);
    let texts = flow.transcript().texts();
    assert_eq!(&texts[3..], &["B.Tech", steps.get(2).unwrap().prompt.as_str()]);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(6)]
fn test_last_answer_jumps_to_final(#[case] length: usize) {
    let fields = [
        FieldKey::Name,
        FieldKey::Qualification,
        FieldKey::Phone,
        FieldKey::Dob,
        FieldKey::About,
        FieldKey::Skills,
    ];
    let mut steps: Vec<_> = fields[..length]
        .iter()
        .map(|field| StepDefinition::text(*field, format!("{}?", field)))
        .collect();
    steps.push(StepDefinition::final_step("done"));
    let table = StepTable::new(steps).unwrap();
    let final_index = table.final_index();

    let mut flow = OnboardingFlow::new(table);
    for i in 0..length {
        flow.submit_answer(&format!("answer {}", i)).unwrap();
    }

    assert_eq!(flow.current_step_index(), final_index);
    assert_eq!(flow.mode(), &FlowMode::Reviewing);
    assert_eq!(
        flow.transcript().last().unwrap().text,
        "All set! You can now review and save your information."
    );
}

#[test]
fn test_edit_detour_updates_only_that_field() {
    let mut flow = completed_flow();
    let before = flow.record().clone();

    flow.request_edit().unwrap();
    flow.begin_edit(FieldKey::Phone).unwrap();
    assert_eq!(flow.mode(), &FlowMode::EditingField(FieldKey::Phone));
    assert_eq!(flow.current_step_index(), 2);
    assert_eq!(
        flow.transcript().last().unwrap().text,
        "You are editing your phone. Enter your phone number."
    );

    // Validators still apply while editing
    assert!(flow.submit_answer("555").is_err());
    assert_eq!(flow.mode(), &FlowMode::EditingField(FieldKey::Phone));

    flow.submit_answer("0123456789").unwrap();
    assert_eq!(flow.mode(), &FlowMode::Reviewing);
    assert_eq!(flow.current_step_index(), flow.steps().final_index());
    assert_eq!(flow.record().get(FieldKey::Phone), Some("0123456789"));

    for (key, value) in before.iter().filter(|(key, _)| *key != FieldKey::Phone) {
        assert_eq!(flow.record().get(key), Some(value));
    }
    assert_eq!(
        flow.transcript().last().unwrap().text,
        "You can now review and save your information."
    );
}

#[test]
fn test_edit_menu_field_rerenders_buttons() {
    let mut flow = completed_flow();
    flow.begin_edit(FieldKey::Qualification).unwrap();
    assert!(matches!(
        flow.current_control(),
        onboard_core::Control::MenuButtons(_)
    ));
    flow.complete_menu_selection("B.E").unwrap();
    assert_eq!(flow.record().get(FieldKey::Qualification), Some("B.E"));
    assert_eq!(flow.mode(), &FlowMode::Reviewing);
}

#[test]
fn test_attachments_store_reference_and_show_name() {
    let flow = completed_flow();
    assert_eq!(flow.record().get(FieldKey::ProfilePhoto), Some("aW1hZ2U="));
    assert_eq!(
        flow.record().get(FieldKey::Document),
        Some("file:///tmp/docs/cv.pdf")
    );

    let texts = flow.transcript().texts();
    assert!(texts.contains(&"me.png"));
    assert!(texts.contains(&"cv.pdf"));
}

#[tokio::test]
async fn test_saving_twice_persists_identical_records() {
    let mut flow = completed_flow();
    let sink = RecordingSink::default();

    flow.finalize_and_save(&sink).await.unwrap();
    flow.finalize_and_save(&sink).await.unwrap();

    let saved = sink.saved.lock().unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0], saved[1]);
    assert_eq!(&saved[0], flow.record());
    assert_eq!(
        flow.transcript()
            .texts()
            .iter()
            .filter(|text| **text == "Information saved!")
            .count(),
        2
    );
    assert_eq!(flow.mode(), &FlowMode::Reviewing);
}

#[tokio::test]
async fn test_failed_save_changes_nothing() {
    let mut flow = completed_flow();
    let record = flow.record().clone();
    let transcript_len = flow.transcript().len();
    let sink = RecordingSink {
        fail: true,
        ..Default::default()
    };

    let result = flow.finalize_and_save(&sink).await;

    assert!(matches!(result, Err(FlowError::NetworkFailure { .. })));
    assert_eq!(flow.record(), &record);
    assert_eq!(flow.transcript().len(), transcript_len);
    assert!(!flow.state().save_in_flight);
    assert_eq!(
        flow.take_effects(),
        vec![Effect::Alert {
            title: "Error".to_string(),
            message: "There was an error saving your information. Please try again.".to_string(),
        }]
    );
}

#[test]
fn test_event_driven_save_blocks_duplicates() {
    let mut flow = completed_flow();

    let effects = flow.handle(FlowEvent::SaveRequested);
    assert!(matches!(effects.as_slice(), [Effect::Persist(_)]));
    assert_eq!(flow.current_control(), onboard_core::Control::Disabled);

    // Second press while the first call is outstanding
    assert!(flow.handle(FlowEvent::SaveRequested).is_empty());

    let effects = flow.handle(FlowEvent::SaveCompleted(Ok(())));
    assert!(matches!(effects.as_slice(), [Effect::Alert { title, .. }] if title == "Success"));
    assert_eq!(flow.transcript().last().unwrap().text, "Information saved!");
}

#[test]
fn test_unrequested_save_completion_is_ignored() {
    let mut flow = OnboardingFlow::new(
        StepTable::new(vec![
            StepDefinition::text(FieldKey::Name, "What is your name?"),
            StepDefinition::final_step("Review your answers."),
        ])
        .unwrap(),
    );
    flow.submit_answer("Alice").unwrap();
    let transcript_len = flow.transcript().len();

    let effects = flow.handle(FlowEvent::SaveCompleted(Ok(())));

    assert!(effects.is_empty());
    assert_eq!(flow.transcript().len(), transcript_len);
    assert_eq!(
        flow.complete_save(Ok(())),
        Err(FlowError::NoSaveInFlight)
    );
}

#[test]
fn test_duplicate_save_completion_applies_once() {
    let mut flow = completed_flow();
    flow.handle(FlowEvent::SaveRequested);
    flow.handle(FlowEvent::SaveCompleted(Ok(())));
    let transcript_len = flow.transcript().len();

    let effects = flow.handle(FlowEvent::SaveCompleted(Ok(())));

    assert!(effects.is_empty());
    assert_eq!(flow.transcript().len(), transcript_len);
}

fn attachment_table() -> StepTable {
    StepTable::new(vec![
        StepDefinition::image(FieldKey::ProfilePhoto, "Please upload a profile photo"),
        StepDefinition::document(FieldKey::Document, "Please upload a document (PDF only)"),
        StepDefinition::final_step("Review your answers."),
    ])
    .unwrap()
}

#[rstest]
#[case::image_cancelled(FileFilter::Images, PickOutcome::Cancelled)]
#[case::image_failed(FileFilter::Images, PickOutcome::Failed("permission denied".to_string()))]
#[case::document_cancelled(FileFilter::Pdf, PickOutcome::Cancelled)]
#[case::document_failed(FileFilter::Pdf, PickOutcome::Failed("file vanished".to_string()))]
fn test_unsuccessful_attachment_pick_changes_nothing(
    #[case] filter: FileFilter,
    #[case] outcome: PickOutcome<PickedFile>,
) {
    let mut flow = OnboardingFlow::new(attachment_table());
    if filter == FileFilter::Pdf {
        flow.complete_image_pick(PickOutcome::Picked(
            PickedFile::new("file:///tmp/me.png").with_content("aW1hZ2U="),
        ))
        .unwrap();
    }
    let record = flow.record().clone();
    let step = flow.current_step_index();
    let transcript_len = flow.transcript().len();

    let event = match filter {
        FileFilter::Images => FlowEvent::ImagePicked(outcome),
        FileFilter::Pdf => FlowEvent::DocumentPicked(outcome),
    };
    let effects = flow.handle(event);

    assert!(effects.is_empty());
    assert_eq!(flow.record(), &record);
    assert_eq!(flow.current_step_index(), step);
    assert_eq!(flow.transcript().len(), transcript_len);
    assert!(flow.pending_error().is_none());
}

#[test]
fn test_scenario_short_table() {
    let mut flow = OnboardingFlow::new(short_table());

    flow.handle(FlowEvent::Submit("Alice".to_string()));
    flow.handle(FlowEvent::MenuSelected("B.Tech".to_string()));

    let effects = flow.handle(FlowEvent::Submit("12345".to_string()));
    assert!(effects.contains(&Effect::Shake));
    assert_eq!(flow.current_step_index(), 2);
    assert_eq!(flow.record().get(FieldKey::Phone), None);

    flow.handle(FlowEvent::Submit("9876543210".to_string()));

    let mut expected = FormRecord::new();
    expected.set(FieldKey::Name, "Alice");
    expected.set(FieldKey::Qualification, "B.Tech");
    expected.set(FieldKey::Phone, "9876543210");
    assert_eq!(flow.record(), &expected);
    assert_eq!(flow.current_step_index(), 3);
    assert_eq!(flow.mode(), &FlowMode::Reviewing);
}
