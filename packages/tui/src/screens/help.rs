use crossterm::event::KeyCode;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::info;

/// Entries on the Help tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Service {
    #[strum(to_string = "Get Your Advocate")]
    Advocate,
    #[strum(to_string = "Family Counselling")]
    FamilyCounselling,
    #[strum(to_string = "Matrimonial Counselling")]
    MatrimonialCounselling,
    #[strum(to_string = "Document Translation")]
    DocumentTranslation,
    #[strum(to_string = "Property Verification")]
    PropertyVerification,
    #[strum(to_string = "Online Consultation")]
    OnlineConsultation,
    #[strum(to_string = "Drafting")]
    Drafting,
    #[strum(to_string = "Templates")]
    Templates,
}

/// Two-column grid of services
#[derive(Debug, Clone, Default)]
pub struct HelpScreen {
    selected: usize,
    last_chosen: Option<Service>,
}

impl HelpScreen {
    pub const COLUMNS: usize = 2;

    pub fn services() -> Vec<Service> {
        Service::iter().collect()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn last_chosen(&self) -> Option<Service> {
        self.last_chosen
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        let count = Service::iter().count();
        match key {
            KeyCode::Right => self.selected = (self.selected + 1) % count,
            KeyCode::Left => self.selected = (self.selected + count - 1) % count,
            KeyCode::Down => self.selected = (self.selected + Self::COLUMNS) % count,
            KeyCode::Up => self.selected = (self.selected + count - Self::COLUMNS) % count,
            KeyCode::Enter => {
                if let Some(service) = Service::iter().nth(self.selected) {
                    info!("{} selected", service);
                    self.last_chosen = Some(service);
                }
            }
            _ => {}
        }
    }
}
