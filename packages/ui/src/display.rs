//! Text shown for patient and assessment fields.

use store::{Patient, PatientAssessment, RiskLevel};

/// Placeholder for a value the server did not send.
pub const MISSING: &str = "—";

/// The value, or [`MISSING`] when it is absent or blank.
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

/// Risk label and CSS class. No label reads as [`MISSING`] with neutral styling.
pub fn risk_badge(risk: Option<&str>) -> (String, &'static str) {
    let class = risk
        .map(RiskLevel::from_label)
        .unwrap_or(RiskLevel::None)
        .css_class();
    (or_dash(risk), class)
}

pub fn age_text(patient: &Patient, year: i32) -> String {
    patient
        .age_in(year)
        .map(|age| age.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Label/value pairs of an assessment result, led by the patient it is for.
pub fn assessment_rows(assessment: &PatientAssessment) -> Vec<(&'static str, String)> {
    vec![
        ("Patient", assessment.patient_id.clone()),
        ("Âge", assessment.age.to_string()),
        ("Déclencheurs", assessment.trigger_count.to_string()),
    ]
}
