pub mod chat;
pub mod controls;
pub mod dialog;
pub mod form;
pub mod popups;
pub mod status_bar;

pub use chat::{ChatWidget, InputWidget};
pub use controls::{display_value, ButtonRowWidget, ReviewPanelWidget};
pub use dialog::{AlertDialog, AlertDialogWidget};
pub use form::{action_line, FormFieldsWidget};
pub use popups::{centered_area, DatePickerWidget, FilePickerWidget};
pub use status_bar::StatusBarWidget;
