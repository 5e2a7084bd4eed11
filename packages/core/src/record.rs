use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Fields of the onboarding record, in review order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Name,
    Qualification,
    Phone,
    Dob,
    About,
    Skills,
    ProfilePhoto,
    Document,
}

impl FieldKey {
    pub const ALL: [FieldKey; 8] = [
        FieldKey::Name,
        FieldKey::Qualification,
        FieldKey::Phone,
        FieldKey::Dob,
        FieldKey::About,
        FieldKey::Skills,
        FieldKey::ProfilePhoto,
        FieldKey::Document,
    ];

    /// Wire name used in the saved JSON body
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Qualification => "qualification",
            FieldKey::Phone => "phone",
            FieldKey::Dob => "dob",
            FieldKey::About => "about",
            FieldKey::Skills => "skills",
            FieldKey::ProfilePhoto => "profilePhoto",
            FieldKey::Document => "document",
        }
    }

    /// Human readable label for review screens
    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::Name => "Name",
            FieldKey::Qualification => "Qualification",
            FieldKey::Phone => "Phone",
            FieldKey::Dob => "Date of Birth",
            FieldKey::About => "About",
            FieldKey::Skills => "Skills",
            FieldKey::ProfilePhoto => "Profile Photo",
            FieldKey::Document => "Document",
        }
    }

    /// Whether the stored value is a file reference rather than typed text
    pub fn is_attachment(&self) -> bool {
        matches!(self, FieldKey::ProfilePhoto | FieldKey::Document)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated answers of the onboarding conversation.
///
/// Serializes as a JSON object carrying every known field, with unset
/// fields sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<FieldKey, String>")]
pub struct FormRecord {
    values: BTreeMap<FieldKey, String>,
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Set fields in review order
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<FieldKey, String>> for FormRecord {
    fn from(values: BTreeMap<FieldKey, String>) -> Self {
        Self { values }
    }
}

impl Serialize for FormRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FieldKey::ALL.len()))?;
        for key in FieldKey::ALL {
            map.serialize_entry(key.as_str(), self.get(key).unwrap_or_default())?;
        }
        map.end()
    }
}
