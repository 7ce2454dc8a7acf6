//! REST paths of the Medilabo API, relative to the configured base URL.

pub const LOGIN: &str = "/login";
pub const PATIENTS: &str = "/api/patient";
pub const PATIENT_INSERT: &str = "/api/patient/insert";
pub const NOTE_INSERT: &str = "/api/note/insert";

pub fn patient(id: &str) -> String {
    format!("/api/patient/{id}")
}

pub fn patient_update(id: &str) -> String {
    format!("/api/patient/update/{id}")
}

pub fn patient_delete(id: &str) -> String {
    format!("/api/patient/delete/{id}")
}

pub fn notes_of(patient_id: &str) -> String {
    format!("/api/note/{patient_id}")
}

pub fn note_update(id: &str) -> String {
    format!("/api/note/update/{id}")
}

pub fn note_delete(id: &str) -> String {
    format!("/api/note/delete/{id}")
}

pub fn assessment(patient_id: &str) -> String {
    format!("/api/assess/{patient_id}")
}
