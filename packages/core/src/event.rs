//! Discrete inputs to the flow engine and the side effects it requests.
//!
//! Front-ends deliver picker results, timer fires and save completions as
//! [`FlowEvent`]s and carry out the returned [`Effect`]s; the engine itself
//! never touches a terminal, a file system or the network.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::record::{FieldKey, FormRecord};
use crate::step::FileFilter;

/// Single outcome of an external picker invocation
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome<T> {
    Picked(T),
    Cancelled,
    Failed(String),
}

/// A file chosen through the image or document picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickedFile {
    /// Name reported by the picker, if any
    pub name: Option<String>,
    /// Location of the file (`file:///...`)
    pub uri: String,
    /// Base64 content, filled in for images
    pub content: Option<String>,
}

impl PickedFile {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            name: None,
            uri: uri.into(),
            content: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    /// Text typed into the input box
    Submit(String),
    MenuSelected(String),
    DatePicked(PickOutcome<NaiveDate>),
    ImagePicked(PickOutcome<PickedFile>),
    DocumentPicked(PickOutcome<PickedFile>),
    /// "Edit Information" pressed on the review step
    RequestEdit,
    BeginEdit(FieldKey),
    SaveRequested,
    SaveCompleted(Result<(), String>),
    ErrorTimerFired { generation: u64 },
}

/// Work the front-end performs on behalf of the engine
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Bounded attention animation on the input area
    Shake,
    /// Deliver `ErrorTimerFired { generation }` after `after`
    ScheduleErrorClear { generation: u64, after: Duration },
    /// Send the record to the persistence collaborator and report back
    /// with `SaveCompleted`
    Persist(FormRecord),
    /// Blocking user-visible notice
    Alert { title: String, message: String },
}

/// Input control the front-end should render for the current state
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    TextBox,
    MenuButtons(Vec<String>),
    DatePicker { max: Option<NaiveDate> },
    FilePicker(FileFilter),
    Review {
        /// Per-field edit buttons are showing
        choosing_field: bool,
    },
    /// Nothing to render, e.g. while a save is outstanding
    Disabled,
}
