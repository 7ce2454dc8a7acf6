use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::backend::Backend;
use crate::error::BackendError;
use crate::models::{Assessment, Credentials, Note, NoteDraft, Patient};
use crate::routes;

/// Backend operations, used to inject failures into [`MemoryBackend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Login,
    CheckSession,
    ListPatients,
    GetPatient,
    CreatePatient,
    UpdatePatient,
    DeletePatient,
    ListNotes,
    CreateNote,
    UpdateNote,
    DeleteNote,
    Assess,
}

#[derive(Debug, Default)]
struct Inner {
    patients: Vec<Patient>,
    notes: Vec<Note>,
    assessments: HashMap<String, Assessment>,
    account: Option<Credentials>,
    logged_in: bool,
    failures: HashMap<Op, BackendError>,
    calls: Vec<String>,
    next_id: u64,
}

/// In-memory Backend for tests and offline demos.
///
/// Every call is recorded as `"METHOD /path"`, matching the HTTP API, so tests
/// can assert exactly which requests a controller issued.
#[derive(Clone, Debug)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// An empty backend with an already valid session.
    pub fn new() -> Self {
        let inner = Inner {
            logged_in: true,
            next_id: 1,
            ..Inner::default()
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Start without a session; `login` with these credentials opens one.
    pub fn logged_out(self) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.logged_in = false;
        }
        self
    }

    pub fn with_account(self, username: &str, password: &str) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.account = Some(Credentials {
                username: username.to_string(),
                password: password.to_string(),
            });
        }
        self
    }

    /// Insert a patient, assigning an id when missing. Returns the id.
    pub fn seed_patient(&self, mut patient: Patient) -> String {
        let mut inner = self.inner.lock().unwrap();
        let id = match patient.id.clone() {
            Some(id) => id,
            None => inner.allocate_id(),
        };
        patient.id = Some(id.clone());
        inner.patients.push(patient);
        id
    }

    /// Insert a note. Returns its id.
    pub fn seed_note(&self, patient_id: &str, body: &str) -> String {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.allocate_id();
        inner.notes.push(Note {
            id: id.clone(),
            pat_id: patient_id.to_string(),
            patient: None,
            note: body.to_string(),
        });
        id
    }

    pub fn seed_assessment(&self, patient_id: &str, assessment: Assessment) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .assessments
            .insert(patient_id.to_string(), assessment);
    }

    /// Make every following call of `op` fail with `error`.
    pub fn fail(&self, op: Op, error: BackendError) {
        self.inner.lock().unwrap().failures.insert(op, error);
    }

    /// Undo [`fail`](Self::fail).
    pub fn recover(&self, op: Op) {
        self.inner.lock().unwrap().failures.remove(&op);
    }

    /// Requests issued so far, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// How many times `call` (e.g. `"GET /api/patient"`) was issued.
    pub fn count(&self, call: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| *c == call)
            .count()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn patients(&self) -> Vec<Patient> {
        self.inner.lock().unwrap().patients.clone()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.inner.lock().unwrap().notes.clone()
    }

    /// Record the call and check injected failures and the session.
    fn enter(&self, op: Op, method: &str, path: &str) -> Result<std::sync::MutexGuard<'_, Inner>, BackendError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("{method} {path}"));
        if let Some(error) = inner.failures.get(&op) {
            return Err(error.clone());
        }
        if op != Op::Login && !inner.logged_in {
            return Err(BackendError::Unauthorized);
        }
        Ok(inner)
    }
}

impl Inner {
    fn allocate_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }
}

impl Backend for MemoryBackend {
    async fn login(&self, credentials: &Credentials) -> Result<(), BackendError> {
        let mut inner = self.enter(Op::Login, "POST", routes::LOGIN)?;
        if inner.account.as_ref() != Some(credentials) {
            return Err(BackendError::Unauthorized);
        }
        inner.logged_in = true;
        Ok(())
    }

    async fn check_session(&self) -> Result<(), BackendError> {
        self.enter(Op::CheckSession, "GET", routes::PATIENTS)?;
        Ok(())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, BackendError> {
        let inner = self.enter(Op::ListPatients, "GET", routes::PATIENTS)?;
        Ok(inner.patients.clone())
    }

    async fn get_patient(&self, id: &str) -> Result<Patient, BackendError> {
        let inner = self.enter(Op::GetPatient, "GET", &routes::patient(id))?;
        inner
            .patients
            .iter()
            .find(|p| p.id.as_deref() == Some(id))
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    async fn create_patient(&self, patient: &Patient) -> Result<(), BackendError> {
        let mut inner = self.enter(Op::CreatePatient, "POST", routes::PATIENT_INSERT)?;
        let mut created = patient.clone();
        created.id = Some(inner.allocate_id());
        inner.patients.push(created);
        Ok(())
    }

    async fn update_patient(&self, id: &str, patient: &Patient) -> Result<(), BackendError> {
        let mut inner = self.enter(Op::UpdatePatient, "PUT", &routes::patient_update(id))?;
        let existing = inner
            .patients
            .iter_mut()
            .find(|p| p.id.as_deref() == Some(id))
            .ok_or(BackendError::NotFound)?;
        *existing = Patient {
            id: Some(id.to_string()),
            ..patient.clone()
        };
        Ok(())
    }

    async fn delete_patient(&self, id: &str) -> Result<(), BackendError> {
        let mut inner = self.enter(Op::DeletePatient, "DELETE", &routes::patient_delete(id))?;
        let before = inner.patients.len();
        inner.patients.retain(|p| p.id.as_deref() != Some(id));
        if inner.patients.len() == before {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }

    async fn list_notes(&self, patient_id: &str) -> Result<Vec<Note>, BackendError> {
        let inner = self.enter(Op::ListNotes, "GET", &routes::notes_of(patient_id))?;
        Ok(inner
            .notes
            .iter()
            .filter(|n| n.pat_id == patient_id)
            .cloned()
            .collect())
    }

    async fn create_note(&self, note: &NoteDraft) -> Result<(), BackendError> {
        let mut inner = self.enter(Op::CreateNote, "POST", routes::NOTE_INSERT)?;
        let id = inner.allocate_id();
        inner.notes.push(Note {
            id,
            pat_id: note.pat_id.clone(),
            patient: note.patient.clone(),
            note: note.note.clone(),
        });
        Ok(())
    }

    async fn update_note(&self, id: &str, note: &NoteDraft) -> Result<(), BackendError> {
        let mut inner = self.enter(Op::UpdateNote, "PUT", &routes::note_update(id))?;
        let existing = inner
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(BackendError::NotFound)?;
        existing.note = note.note.clone();
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<(), BackendError> {
        let mut inner = self.enter(Op::DeleteNote, "DELETE", &routes::note_delete(id))?;
        let before = inner.notes.len();
        inner.notes.retain(|n| n.id != id);
        if inner.notes.len() == before {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }

    async fn assess(&self, patient_id: &str) -> Result<Assessment, BackendError> {
        let inner = self.enter(Op::Assess, "GET", &routes::assessment(patient_id))?;
        inner
            .assessments
            .get(patient_id)
            .cloned()
            .ok_or(BackendError::NotFound)
    }
}
