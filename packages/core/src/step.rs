//! Declarative step table of the onboarding conversation.
//!
//! Steps are plain data: the engine in [`crate::flow`] never branches on a
//! particular field, only on the [`StepKind`] tag.

use chrono::{Months, NaiveDate};
use onboard_config::defaults::DEFAULT_MINIMUM_AGE_YEARS;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{FlowError, FlowResult};
use crate::record::FieldKey;
use crate::utils::parse_date;

/// Predicate applied to the raw answer of a step
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Validator {
    /// Exactly `n` ASCII decimal digits
    Digits(usize),
    /// Whole answer must match the pattern
    Pattern(#[serde(serialize_with = "serialize_regex")] Regex),
}

impl Validator {
    /// The pattern is anchored at both ends
    pub fn pattern(pattern: &str) -> FlowResult<Self> {
        Regex::new(&format!("^(?:{pattern})$"))
            .map(Validator::Pattern)
            .map_err(|e| FlowError::InvalidStepTable(format!("bad pattern {pattern}: {e}")))
    }

    pub fn check(&self, raw: &str) -> bool {
        match self {
            Validator::Digits(n) => raw.len() == *n && raw.bytes().all(|b| b.is_ascii_digit()),
            Validator::Pattern(regex) => regex.is_match(raw),
        }
    }
}

fn serialize_regex<S: Serializer>(regex: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
    let anchored = regex.as_str();
    let inner = anchored
        .strip_prefix("^(?:")
        .and_then(|rest| rest.strip_suffix(")$"))
        .unwrap_or(anchored);
    serializer.serialize_str(inner)
}

/// Upper bound on selectable dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DateRule {
    /// Reject dates less than `years` years before today
    MinimumAge { years: u32 },
}

impl DateRule {
    /// Latest date a picker may offer
    pub fn max_date(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DateRule::MinimumAge { years } => today
                .checked_sub_months(Months::new(years.saturating_mul(12)))
                .unwrap_or(NaiveDate::MIN),
        }
    }

    pub fn allows(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date <= self.max_date(today)
    }
}

/// Content-type filter handed to the file picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFilter {
    Images,
    Pdf,
}

impl FileFilter {
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileFilter::Images => &["png", "jpg", "jpeg", "gif", "webp", "bmp"],
            FileFilter::Pdf => &["pdf"],
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions().iter().any(|allowed| *allowed == ext)
            })
            .unwrap_or(false)
    }
}

/// Input kind of a step, carrying the kind-specific configuration
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StepKind {
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        validator: Option<Validator>,
    },
    Menu {
        options: Vec<String>,
    },
    Date {
        #[serde(skip_serializing_if = "Option::is_none")]
        rule: Option<DateRule>,
    },
    Image,
    Document,
    Final,
}

/// One unit of the onboarding sequence
#[derive(Debug, Clone, Serialize)]
pub struct StepDefinition {
    #[serde(flatten)]
    pub kind: StepKind,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldKey>,
}

impl StepDefinition {
    pub fn text(field: FieldKey, prompt: impl Into<String>) -> Self {
        Self::with_kind(StepKind::Text { validator: None }, Some(field), prompt)
    }

    pub fn validated_text(field: FieldKey, prompt: impl Into<String>, validator: Validator) -> Self {
        Self::with_kind(
            StepKind::Text {
                validator: Some(validator),
            },
            Some(field),
            prompt,
        )
    }

    pub fn menu<I, S>(field: FieldKey, prompt: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(Into::into).collect();
        Self::with_kind(StepKind::Menu { options }, Some(field), prompt)
    }

    pub fn date(field: FieldKey, prompt: impl Into<String>, rule: Option<DateRule>) -> Self {
        Self::with_kind(StepKind::Date { rule }, Some(field), prompt)
    }

    pub fn image(field: FieldKey, prompt: impl Into<String>) -> Self {
        Self::with_kind(StepKind::Image, Some(field), prompt)
    }

    pub fn document(field: FieldKey, prompt: impl Into<String>) -> Self {
        Self::with_kind(StepKind::Document, Some(field), prompt)
    }

    pub fn final_step(prompt: impl Into<String>) -> Self {
        Self::with_kind(StepKind::Final, None, prompt)
    }

    fn with_kind(kind: StepKind, field: Option<FieldKey>, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
            field,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self.kind, StepKind::Final)
    }

    /// Kind-specific acceptance check on a non-empty raw answer.
    ///
    /// Text steps run their validator, menu steps require one of their
    /// options and date steps with a rule require a parseable date within
    /// the bound.
    pub fn accepts(&self, raw: &str, today: NaiveDate) -> bool {
        match &self.kind {
            StepKind::Text { validator } => validator.as_ref().map_or(true, |v| v.check(raw)),
            StepKind::Menu { options } => options.iter().any(|option| option == raw),
            StepKind::Date { rule: Some(rule) } => {
                parse_date(raw).is_some_and(|date| rule.allows(date, today))
            }
            StepKind::Date { rule: None } | StepKind::Image | StepKind::Document => true,
            StepKind::Final => false,
        }
    }
}

/// Ordered, validated step sequence ending in exactly one `Final` step
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct StepTable {
    steps: Vec<StepDefinition>,
}

impl StepTable {
    pub fn new(steps: Vec<StepDefinition>) -> FlowResult<Self> {
        let Some(last) = steps.last() else {
            return Err(FlowError::InvalidStepTable("no steps".to_string()));
        };
        if !last.is_final() {
            return Err(FlowError::InvalidStepTable(
                "last step must be the final step".to_string(),
            ));
        }
        if steps.iter().filter(|step| step.is_final()).count() != 1 {
            return Err(FlowError::InvalidStepTable(
                "exactly one final step is allowed".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (index, step) in steps.iter().enumerate() {
            match (&step.kind, step.field) {
                (StepKind::Final, _) => {}
                (_, None) => {
                    return Err(FlowError::InvalidStepTable(format!(
                        "step {index} has no field"
                    )))
                }
                (kind, Some(field)) => {
                    if !seen.insert(field) {
                        return Err(FlowError::InvalidStepTable(format!(
                            "field {field} is collected twice"
                        )));
                    }
                    if let StepKind::Menu { options } = kind {
                        if options.is_empty() {
                            return Err(FlowError::InvalidStepTable(format!(
                                "menu step for {field} has no options"
                            )));
                        }
                    }
                }
            }
        }

        Ok(Self { steps })
    }

    pub fn get(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn final_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn position_of(&self, field: FieldKey) -> Option<usize> {
        self.steps.iter().position(|step| step.field == Some(field))
    }

    /// Fields that can be revisited from the review step
    pub fn editable_fields(&self) -> Vec<FieldKey> {
        self.steps.iter().filter_map(|step| step.field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDefinition> {
        self.steps.iter()
    }
}

/// The onboarding sequence used by the app.
///
/// `minimum_age_years` of `0` leaves the date of birth unbounded.
pub fn default_steps(minimum_age_years: u32) -> StepTable {
    let dob_rule = (minimum_age_years > 0).then_some(DateRule::MinimumAge {
        years: minimum_age_years,
    });

    let steps = vec![
        StepDefinition::text(FieldKey::Name, "Welcome! Please tell me your name."),
        StepDefinition::menu(
            FieldKey::Qualification,
            "What is your qualification?",
            ["B.Tech", "B.E", "B.Sc", "M.Tech", "M.Sc"],
        ),
        StepDefinition::validated_text(
            FieldKey::Phone,
            "Enter your phone number.",
            Validator::Digits(10),
        ),
        StepDefinition::date(FieldKey::Dob, "Enter your date of birth.", dob_rule),
        StepDefinition::text(FieldKey::About, "Tell me a bit about yourself."),
        StepDefinition::text(FieldKey::Skills, "What are your skills?"),
        StepDefinition::image(FieldKey::ProfilePhoto, "Please upload a profile photo"),
        StepDefinition::document(FieldKey::Document, "Please upload a document (PDF only)"),
        StepDefinition::final_step("Thank you! You can now review and save your information."),
    ];

    StepTable { steps }
}

impl Default for StepTable {
    fn default() -> Self {
        default_steps(DEFAULT_MINIMUM_AGE_YEARS)
    }
}
