//! # Domain models for patients, notes and risk assessments
//!
//! Defines the records exchanged with the Medilabo REST API. Every type is
//! `Serialize + Deserialize` with camelCase keys so it maps one-to-one onto the
//! JSON bodies of the patient, note and assessment services.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Patient`] | A patient record. `id` is assigned by the server and absent until the record is persisted. The risk category is computed server side and travels under the `risque` key. |
//! | [`Gender`] | Closed `MALE` / `FEMALE` enum. |
//! | [`RiskLevel`] | Parsed view of the risk label, used for display styling only. |
//! | [`Note`] | A clinical note attached to a patient through `patId`. |
//! | [`NoteDraft`] | The body sent when creating or updating a note. |
//! | [`Assessment`] | The payload returned by `/api/assess/:patientId`. |
//! | [`PatientAssessment`] | An [`Assessment`] tagged with the patient id it was requested for. |
//!
//! ## Age
//!
//! [`Patient::age_in`] reproduces the simplified arithmetic used across the
//! product: current year minus birth year, with no month/day adjustment.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Biological sex as accepted by the patient service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Wire value: `"MALE"` or `"FEMALE"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }

    /// Parse the wire value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            _ => None,
        }
    }

    /// Label shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Homme",
            Gender::Female => "Femme",
        }
    }
}

/// A patient record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Server-assigned identifier, `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    /// Date-only string: "1990-05-01"
    pub birth_date: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub gender: Gender,
    /// Risk label computed by the assessment service.
    #[serde(
        default,
        rename = "risque",
        alias = "risk",
        skip_serializing_if = "Option::is_none"
    )]
    pub risk: Option<String>,
}

impl Patient {
    /// Birth year parsed from `birth_date`.
    pub fn birth_year(&self) -> Option<i32> {
        NaiveDate::parse_from_str(self.birth_date.trim(), "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }

    /// Age relative to `year`: `year - birth_year`.
    pub fn age_in(&self, year: i32) -> Option<i32> {
        self.birth_year().map(|born| year - born)
    }

    /// Age relative to the current calendar year.
    pub fn age(&self) -> Option<i32> {
        self.age_in(current_year())
    }

    /// Parsed risk level, `None` when the server sent no label.
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.risk.as_deref().map(RiskLevel::from_label)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Current calendar year, from the system clock (or `Date` on WASM).
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Risk categories produced by the assessment service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    None,
    Borderline,
    InDanger,
    EarlyOnset,
    /// A label this client does not know, kept verbatim.
    Other(String),
}

impl RiskLevel {
    /// Parse a server label. Both `"Early onset"` and `"EarlyOnset"` are accepted.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "None" => RiskLevel::None,
            "Borderline" => RiskLevel::Borderline,
            "In Danger" => RiskLevel::InDanger,
            "Early onset" | "EarlyOnset" => RiskLevel::EarlyOnset,
            other => RiskLevel::Other(other.to_string()),
        }
    }

    /// CSS modifier used to colour the label.
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::InDanger => "risk risk--danger",
            RiskLevel::EarlyOnset => "risk risk--early",
            RiskLevel::Borderline => "risk risk--borderline",
            RiskLevel::None | RiskLevel::Other(_) => "risk risk--none",
        }
    }
}

/// A clinical note.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    /// Owning patient id.
    pub pat_id: String,
    /// Patient display name, denormalised by the note service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<String>,
    /// Free-text body.
    #[serde(default)]
    pub note: String,
}

/// Request body for creating or updating a note.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    /// Present when editing an existing note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub pat_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<String>,
    pub note: String,
}

impl NoteDraft {
    /// Empty note body for `patient_id`.
    pub fn for_patient(patient_id: &str) -> Self {
        Self {
            pat_id: patient_id.to_string(),
            ..Self::default()
        }
    }
}

impl From<Note> for NoteDraft {
    fn from(note: Note) -> Self {
        Self {
            id: Some(note.id),
            pat_id: note.pat_id,
            patient: note.patient,
            note: note.note,
        }
    }
}

/// Payload of `GET /api/assess/:patientId`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub age: i32,
    pub trigger_count: u32,
    pub risk: String,
}

/// An assessment tagged with the patient it was requested for.
#[derive(Clone, Debug, PartialEq)]
pub struct PatientAssessment {
    pub patient_id: String,
    pub age: i32,
    pub trigger_count: u32,
    pub risk: String,
}

impl PatientAssessment {
    pub fn new(patient_id: &str, assessment: Assessment) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            age: assessment.age,
            trigger_count: assessment.trigger_count,
            risk: assessment.risk,
        }
    }
}

/// Login form fields, posted form-encoded to `/login`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
