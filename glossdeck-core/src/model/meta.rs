use serde::{Deserialize, Serialize};

/// Title-slide metadata for a presentation. Every field is optional in the
/// sense that an empty string means "leave it off the slide".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PresentationMeta {
    pub title: String,
    pub subtitle: String,
    pub instructor_name: String,
    pub contact_info: String,
    pub date: String,
    pub location: String,
}

impl PresentationMeta {
    pub fn get(&self, field: MetaField) -> &str {
        match field {
            MetaField::Title => &self.title,
            MetaField::Subtitle => &self.subtitle,
            MetaField::InstructorName => &self.instructor_name,
            MetaField::ContactInfo => &self.contact_info,
            MetaField::Date => &self.date,
            MetaField::Location => &self.location,
        }
    }

    pub fn set(&mut self, field: MetaField, value: String) {
        let slot = match field {
            MetaField::Title => &mut self.title,
            MetaField::Subtitle => &mut self.subtitle,
            MetaField::InstructorName => &mut self.instructor_name,
            MetaField::ContactInfo => &mut self.contact_info,
            MetaField::Date => &mut self.date,
            MetaField::Location => &mut self.location,
        };
        *slot = value;
    }
}

/// Editable metadata fields, in the order the editor lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Title,
    Subtitle,
    InstructorName,
    ContactInfo,
    Date,
    Location,
}

impl MetaField {
    pub fn all() -> &'static [MetaField] {
        &[
            MetaField::Title,
            MetaField::Subtitle,
            MetaField::InstructorName,
            MetaField::ContactInfo,
            MetaField::Date,
            MetaField::Location,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetaField::Title => "Title",
            MetaField::Subtitle => "Subtitle",
            MetaField::InstructorName => "Instructor",
            MetaField::ContactInfo => "Contact",
            MetaField::Date => "Date",
            MetaField::Location => "Location",
        }
    }
}
