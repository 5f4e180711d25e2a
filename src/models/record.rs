// file: src/models/record.rs
// description: provider and clinic rows as loaded from the tabular datasets
// reference: normalized dataset column names

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Provider,
    Clinic,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Provider => "provider",
            RecordKind::Clinic => "clinic",
        }
    }
}

/// A care provider row. Missing cells are empty strings, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderRecord {
    pub name: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub languages: String,
    #[serde(default)]
    pub services: String,
    #[serde(default)]
    pub qualifications: String,
    #[serde(default)]
    pub designation: String,
}

impl ProviderRecord {
    pub fn new(name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specialty: specialty.into(),
            ..Self::default()
        }
    }

    pub fn with_languages(mut self, languages: impl Into<String>) -> Self {
        self.languages = languages.into();
        self
    }

    pub fn with_services(mut self, services: impl Into<String>) -> Self {
        self.services = services.into();
        self
    }

    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = designation.into();
        self
    }

    pub fn with_qualifications(mut self, qualifications: impl Into<String>) -> Self {
        self.qualifications = qualifications.into();
        self
    }
}

/// A clinic row. `address` may embed a postal code in free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClinicRecord {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub contact: String,
}

impl ClinicRecord {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        area: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            area: area.into(),
            contact: String::new(),
        }
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = contact.into();
        self
    }
}
