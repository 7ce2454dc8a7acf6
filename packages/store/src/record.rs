//! # Patient record controller
//!
//! Drives the detail view of one patient: the patient card, the note list
//! with its Add and Edit modals, and the on-demand risk assessment.
//!
//! Note mutations do not all follow the same policy:
//!
//! | Action | On success |
//! |--------|------------|
//! | add | close the modal, reset the draft, re-fetch the note list |
//! | edit | close the modal, patch the body of the matching note in place |
//! | delete | drop the note from the in-memory list |
//!
//! Only the add path goes back to the server for the list; edit and delete
//! trust their own successful response.

use crate::backend::Backend;
use crate::collection::Collection;
use crate::error::{BackendError, FieldError};
use crate::forms::{Draft, FormState, Submission};
use crate::models::{Note, NoteDraft, Patient, PatientAssessment};
use crate::observable::Observable;
use crate::session::Session;

#[derive(Clone, Debug, PartialEq)]
pub struct PatientRecordState {
    pub patient_id: String,
    /// `None` while loading, or when the patient could not be fetched.
    pub patient: Option<Patient>,
    pub notes: Collection<Note>,
    pub loading: bool,
    pub add_note: FormState<NoteDraft>,
    pub edit_note: FormState<NoteDraft>,
    /// Last assessment received. Kept when a later request fails.
    pub assessment: Option<PatientAssessment>,
    pub assessing: bool,
}

impl PatientRecordState {
    fn new(patient_id: &str) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            patient: None,
            notes: Collection::new(),
            loading: true,
            add_note: FormState::new(NoteDraft::for_patient(patient_id)),
            edit_note: FormState::new(NoteDraft::for_patient(patient_id)),
            assessment: None,
            assessing: false,
        }
    }

    /// Loading is over and no patient came back.
    pub fn not_found(&self) -> bool {
        !self.loading && self.patient.is_none()
    }
}

/// Controller for the patient detail view.
#[derive(Clone)]
pub struct PatientRecord<B> {
    backend: B,
    patient_id: String,
    state: Observable<PatientRecordState>,
}

impl<B: Backend> PatientRecord<B> {
    pub fn new(backend: B, _session: &Session, patient_id: &str) -> Self {
        Self {
            backend,
            patient_id: patient_id.to_string(),
            state: Observable::new(PatientRecordState::new(patient_id)),
        }
    }

    pub fn state(&self) -> &Observable<PatientRecordState> {
        &self.state
    }

    pub fn snapshot(&self) -> PatientRecordState {
        self.state.get()
    }

    /// Fetch the patient and its notes in parallel.
    ///
    /// Both must succeed for either to be shown.
    pub async fn load(&self) -> Result<(), BackendError> {
        let id = self.patient_id.as_str();
        let (patient, notes) =
            futures::join!(self.backend.get_patient(id), self.backend.list_notes(id));

        match (patient, notes) {
            (Ok(patient), Ok(notes)) => {
                tracing::debug!(patient = id, notes = notes.len(), "patient record loaded");
                self.state.update(|s| {
                    s.patient = Some(patient);
                    s.notes.replace(notes);
                    s.loading = false;
                });
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!("error loading patient {id}: {e}");
                self.state.update(|s| {
                    s.notes.finish_load();
                    s.loading = false;
                });
                Err(e)
            }
        }
    }

    async fn fetch_notes(&self) -> Result<(), BackendError> {
        match self.backend.list_notes(&self.patient_id).await {
            Ok(notes) => {
                self.state.update(|s| s.notes.replace(notes));
                Ok(())
            }
            Err(e) => {
                tracing::error!("error fetching notes of {}: {e}", self.patient_id);
                self.state.update(|s| s.notes.finish_load());
                Err(e)
            }
        }
    }

    async fn settle(&self) {
        while self
            .state
            .update(|s| s.notes.take_refresh())
            .unwrap_or(false)
        {
            let _ = self.fetch_notes().await;
        }
    }

    pub fn open_add_note(&self) {
        self.state.update(|s| s.add_note.open());
    }

    pub fn close_add_note(&self) {
        self.state.update(|s| s.add_note.close());
    }

    pub fn set_add_note_field(&self, name: &str, value: &str) -> Result<(), FieldError> {
        self.state
            .update(|s| s.add_note.set_field(name, value))
            .unwrap_or(Ok(()))
    }

    pub fn open_edit_note(&self, note: Note) {
        self.state.update(|s| s.edit_note.open_with(NoteDraft::from(note)));
    }

    pub fn close_edit_note(&self) {
        self.state.update(|s| s.edit_note.close());
    }

    pub fn set_edit_note_field(&self, name: &str, value: &str) -> Result<(), FieldError> {
        self.state
            .update(|s| s.edit_note.set_field(name, value))
            .unwrap_or(Ok(()))
    }

    /// `POST /api/note/insert`, then re-fetch the note list.
    pub async fn submit_add_note(&self) -> Result<Submission, BackendError> {
        let draft = self.state.read(|s| s.add_note.draft().clone());
        if let Err(e) = self.backend.create_note(&draft).await {
            tracing::error!("error adding note: {e}");
            return Err(e);
        }
        self.state.update(|s| {
            s.add_note.close();
            s.notes.mark_stale();
        });
        self.settle().await;
        Ok(Submission::Saved)
    }

    /// `PUT /api/note/update/:id`, then patch the note body locally.
    pub async fn submit_edit_note(&self) -> Result<Submission, BackendError> {
        let draft = self.state.read(|s| s.edit_note.draft().clone());
        let Some(id) = draft.persisted_id().map(str::to_string) else {
            tracing::debug!("note edit submitted without an id, ignoring");
            return Ok(Submission::Skipped);
        };
        if let Err(e) = self.backend.update_note(&id, &draft).await {
            tracing::error!("error updating note {id}: {e}");
            return Err(e);
        }
        self.state.update(|s| {
            s.edit_note.close();
            s.notes
                .update_where(|n| n.id == id, |n| n.note = draft.note.clone());
        });
        Ok(Submission::Saved)
    }

    /// `DELETE /api/note/delete/:id`, then drop the note locally.
    pub async fn delete_note(&self, id: &str) -> Result<(), BackendError> {
        if let Err(e) = self.backend.delete_note(id).await {
            tracing::error!("error deleting note {id}: {e}");
            return Err(e);
        }
        self.state.update(|s| s.notes.remove_where(|n| n.id == id));
        Ok(())
    }

    /// `GET /api/assess/:patientId`. Each call hits the API again.
    pub async fn request_assessment(&self) -> Result<PatientAssessment, BackendError> {
        self.state.update(|s| s.assessing = true);
        match self.backend.assess(&self.patient_id).await {
            Ok(assessment) => {
                let tagged = PatientAssessment::new(&self.patient_id, assessment);
                self.state.update(|s| {
                    s.assessment = Some(tagged.clone());
                    s.assessing = false;
                });
                Ok(tagged)
            }
            Err(e) => {
                tracing::error!("error assessing patient {}: {e}", self.patient_id);
                self.state.update(|s| s.assessing = false);
                Err(e)
            }
        }
    }

    pub fn close(&self) {
        self.state.close();
    }
}
