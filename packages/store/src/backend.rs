//! # Backend — the async boundary to the Medilabo REST API
//!
//! Every controller in this crate talks to the API through the [`Backend`]
//! trait, so the same refresh and session logic runs against the real HTTP
//! client (`api::ApiClient`) in the browser and against
//! [`MemoryBackend`](crate::MemoryBackend) in tests.
//!
//! Mutations return `()` on success: responses are never spliced into local
//! state, the collection is re-fetched instead.

use std::future::Future;

use crate::error::BackendError;
use crate::models::{Assessment, Credentials, Note, NoteDraft, Patient};

/// Async interface to the patient, note and assessment services.
pub trait Backend {
    /// `POST /login`, form-encoded. Establishes the session cookie.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<(), BackendError>>;

    /// `GET /api/patient`, used only for its status code.
    fn check_session(&self) -> impl Future<Output = Result<(), BackendError>>;

    /// `GET /api/patient`
    fn list_patients(&self) -> impl Future<Output = Result<Vec<Patient>, BackendError>>;

    /// `GET /api/patient/:id`
    fn get_patient(&self, id: &str) -> impl Future<Output = Result<Patient, BackendError>>;

    /// `POST /api/patient/insert`
    fn create_patient(&self, patient: &Patient) -> impl Future<Output = Result<(), BackendError>>;

    /// `PUT /api/patient/update/:id`
    fn update_patient(
        &self,
        id: &str,
        patient: &Patient,
    ) -> impl Future<Output = Result<(), BackendError>>;

    /// `DELETE /api/patient/delete/:id`
    fn delete_patient(&self, id: &str) -> impl Future<Output = Result<(), BackendError>>;

    /// `GET /api/note/:patientId`
    fn list_notes(&self, patient_id: &str) -> impl Future<Output = Result<Vec<Note>, BackendError>>;

    /// `POST /api/note/insert`
    fn create_note(&self, note: &NoteDraft) -> impl Future<Output = Result<(), BackendError>>;

    /// `PUT /api/note/update/:id`
    fn update_note(&self, id: &str, note: &NoteDraft) -> impl Future<Output = Result<(), BackendError>>;

    /// `DELETE /api/note/delete/:id`
    fn delete_note(&self, id: &str) -> impl Future<Output = Result<(), BackendError>>;

    /// `GET /api/assess/:patientId`
    fn assess(&self, patient_id: &str) -> impl Future<Output = Result<Assessment, BackendError>>;
}
