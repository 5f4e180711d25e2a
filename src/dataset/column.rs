// file: src/dataset/column.rs
// description: column tags and the record trait shared by both datasets
// reference: header normalization rules for provider and clinic sheets

use crate::models::{ClinicRecord, ProviderRecord, RecordKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Column {
    Name,
    Specialty,
    Languages,
    Services,
    Qualifications,
    Designation,
    Address,
    Area,
    Contact,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Specialty => "Specialty",
            Column::Languages => "Languages",
            Column::Services => "Services",
            Column::Qualifications => "Qualifications",
            Column::Designation => "Designation",
            Column::Address => "Address",
            Column::Area => "Area",
            Column::Contact => "Contact",
        }
    }
}

/// A dataset row addressable by normalized column.
pub trait Record: Clone + Default {
    const KIND: RecordKind;
    const COLUMNS: &'static [Column];

    /// Cell value, or `None` if this record type has no such column.
    fn field(&self, column: Column) -> Option<&str>;

    fn set_field(&mut self, column: Column, value: String);

    /// Maps a raw sheet header onto a normalized column.
    fn classify_header(header: &str) -> Option<Column>;

    fn name(&self) -> &str {
        self.field(Column::Name).unwrap_or("")
    }
}

impl Record for ProviderRecord {
    const KIND: RecordKind = RecordKind::Provider;
    const COLUMNS: &'static [Column] = &[
        Column::Name,
        Column::Specialty,
        Column::Languages,
        Column::Services,
        Column::Qualifications,
        Column::Designation,
    ];

    fn field(&self, column: Column) -> Option<&str> {
        match column {
            Column::Name => Some(&self.name),
            Column::Specialty => Some(&self.specialty),
            Column::Languages => Some(&self.languages),
            Column::Services => Some(&self.services),
            Column::Qualifications => Some(&self.qualifications),
            Column::Designation => Some(&self.designation),
            _ => None,
        }
    }

    fn set_field(&mut self, column: Column, value: String) {
        match column {
            Column::Name => self.name = value,
            Column::Specialty => self.specialty = value,
            Column::Languages => self.languages = value,
            Column::Services => self.services = value,
            Column::Qualifications => self.qualifications = value,
            Column::Designation => self.designation = value,
            _ => {}
        }
    }

    fn classify_header(header: &str) -> Option<Column> {
        let header = header.trim().to_lowercase();

        if header.contains("name") {
            Some(Column::Name)
        } else if header.contains("specialty") {
            Some(Column::Specialty)
        } else if header.contains("language") {
            Some(Column::Languages)
        } else if header.contains("services") {
            Some(Column::Services)
        } else if header.contains("qualifications") {
            Some(Column::Qualifications)
        } else if header.contains("designation") {
            Some(Column::Designation)
        } else {
            None
        }
    }
}

impl Record for ClinicRecord {
    const KIND: RecordKind = RecordKind::Clinic;
    const COLUMNS: &'static [Column] =
        &[Column::Name, Column::Address, Column::Area, Column::Contact];

    fn field(&self, column: Column) -> Option<&str> {
        match column {
            Column::Name => Some(&self.name),
            Column::Address => Some(&self.address),
            Column::Area => Some(&self.area),
            Column::Contact => Some(&self.contact),
            _ => None,
        }
    }

    fn set_field(&mut self, column: Column, value: String) {
        match column {
            Column::Name => self.name = value,
            Column::Address => self.address = value,
            Column::Area => self.area = value,
            Column::Contact => self.contact = value,
            _ => {}
        }
    }

    fn classify_header(header: &str) -> Option<Column> {
        let header = header.trim().to_lowercase();

        if header == "name" || header.contains("clinic name") {
            Some(Column::Name)
        } else if header.contains("address") {
            Some(Column::Address)
        } else if header.contains("area") {
            Some(Column::Area)
        } else if ["contact", "phone", "tel"]
            .iter()
            .any(|k| header.contains(k))
        {
            Some(Column::Contact)
        } else {
            None
        }
    }
}
