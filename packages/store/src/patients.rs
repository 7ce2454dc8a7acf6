//! # Patient list controller
//!
//! Drives the home view: the patient table plus its Add and Edit modals.
//!
//! All patient mutations are pessimistic. After the API accepts a create,
//! update or delete, the controller closes the modal, marks the list stale and
//! immediately runs one fetch-replace cycle. The new or edited row only shows
//! up once `GET /api/patient` has answered. A failed mutation changes nothing:
//! the list stays as it was and the modal stays open.

use crate::backend::Backend;
use crate::collection::Collection;
use crate::error::{BackendError, FieldError};
use crate::forms::{Draft, FormState, Submission};
use crate::models::{Gender, Patient};
use crate::observable::Observable;
use crate::session::Session;

/// Blank patient used to seed the Add form.
pub fn empty_patient() -> Patient {
    Patient {
        id: None,
        first_name: String::new(),
        last_name: String::new(),
        birth_date: String::new(),
        address: Some(String::new()),
        phone: Some(String::new()),
        gender: Gender::Male,
        risk: None,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatientListState {
    pub patients: Collection<Patient>,
    pub add: FormState<Patient>,
    pub edit: FormState<Patient>,
}

impl Default for PatientListState {
    fn default() -> Self {
        Self {
            patients: Collection::new(),
            add: FormState::new(empty_patient()),
            edit: FormState::new(empty_patient()),
        }
    }
}

/// Controller for the patient list view.
#[derive(Clone)]
pub struct PatientList<B> {
    backend: B,
    state: Observable<PatientListState>,
}

impl<B: Backend> PatientList<B> {
    pub fn new(backend: B, _session: &Session) -> Self {
        Self {
            backend,
            state: Observable::new(PatientListState::default()),
        }
    }

    pub fn state(&self) -> &Observable<PatientListState> {
        &self.state
    }

    pub fn snapshot(&self) -> PatientListState {
        self.state.get()
    }

    /// Initial fetch on mount.
    pub async fn load(&self) -> Result<(), BackendError> {
        self.state.update(|s| s.patients.begin_load());
        self.fetch().await
    }

    async fn fetch(&self) -> Result<(), BackendError> {
        match self.backend.list_patients().await {
            Ok(patients) => {
                tracing::debug!(count = patients.len(), "patients fetched");
                self.state.update(|s| s.patients.replace(patients));
                Ok(())
            }
            Err(e) => {
                tracing::error!("error fetching patients: {e}");
                self.state.update(|s| s.patients.replace(Vec::new()));
                Err(e)
            }
        }
    }

    /// Run one fetch-replace cycle per pending refresh.
    async fn settle(&self) {
        while self
            .state
            .update(|s| s.patients.take_refresh())
            .unwrap_or(false)
        {
            // A failed refresh is logged by fetch and leaves an empty list.
            let _ = self.fetch().await;
        }
    }

    pub fn open_add(&self) {
        self.state.update(|s| s.add.open());
    }

    pub fn close_add(&self) {
        self.state.update(|s| s.add.close());
    }

    pub fn set_add_field(&self, name: &str, value: &str) -> Result<(), FieldError> {
        self.state
            .update(|s| s.add.set_field(name, value))
            .unwrap_or(Ok(()))
    }

    /// Open the Edit modal seeded from a table row.
    pub fn open_edit(&self, patient: Patient) {
        self.state.update(|s| s.edit.open_with(patient));
    }

    pub fn close_edit(&self) {
        self.state.update(|s| s.edit.close());
    }

    pub fn set_edit_field(&self, name: &str, value: &str) -> Result<(), FieldError> {
        self.state
            .update(|s| s.edit.set_field(name, value))
            .unwrap_or(Ok(()))
    }

    /// `POST /api/patient/insert` with the Add draft.
    pub async fn submit_add(&self) -> Result<Submission, BackendError> {
        let draft = self.state.read(|s| s.add.draft().clone());
        if let Err(e) = self.backend.create_patient(&draft).await {
            tracing::error!("error adding patient: {e}");
            return Err(e);
        }
        self.state.update(|s| {
            s.add.close();
            s.patients.mark_stale();
        });
        self.settle().await;
        Ok(Submission::Saved)
    }

    /// `PUT /api/patient/update/:id` with the Edit draft.
    ///
    /// A draft without an identifier is not sent.
    pub async fn submit_edit(&self) -> Result<Submission, BackendError> {
        let draft = self.state.read(|s| s.edit.draft().clone());
        let Some(id) = draft.persisted_id().map(str::to_string) else {
            tracing::debug!("edit submitted without a patient id, ignoring");
            return Ok(Submission::Skipped);
        };
        if let Err(e) = self.backend.update_patient(&id, &draft).await {
            tracing::error!("error updating patient {id}: {e}");
            return Err(e);
        }
        self.state.update(|s| {
            s.edit.close();
            s.patients.mark_stale();
        });
        self.settle().await;
        Ok(Submission::Saved)
    }

    /// `DELETE /api/patient/delete/:id`
    pub async fn delete(&self, id: &str) -> Result<(), BackendError> {
        if let Err(e) = self.backend.delete_patient(id).await {
            tracing::error!("error deleting patient {id}: {e}");
            return Err(e);
        }
        self.state.update(|s| s.patients.mark_stale());
        self.settle().await;
        Ok(())
    }

    /// Tear the view down. Late responses are discarded.
    pub fn close(&self) {
        self.state.close();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::collection::Freshness;
    use crate::memory::{MemoryBackend, Op};
    use crate::models::current_year;

    fn controller(backend: &MemoryBackend) -> PatientList<MemoryBackend> {
        PatientList::new(backend.clone(), &Session::verified())
    }

    fn fill_jean(list: &PatientList<MemoryBackend>) {
        list.open_add();
        list.set_add_field("firstName", "Jean").unwrap();
        list.set_add_field("lastName", "Dupont").unwrap();
        list.set_add_field("birthDate", "1990-05-01").unwrap();
        list.set_add_field("gender", "MALE").unwrap();
    }

    #[tokio::test]
    async fn test_load_populates_list() {
        let backend = MemoryBackend::new();
        backend.seed_patient(Patient {
            first_name: "Ana".to_string(),
            birth_date: "1985-02-03".to_string(),
            ..empty_patient()
        });
        let list = controller(&backend);
        assert!(list.snapshot().patients.is_loading());

        list.load().await.unwrap();
        let state = list.snapshot();
        assert!(!state.patients.is_loading());
        assert_eq!(state.patients.len(), 1);
        assert_eq!(state.patients.freshness(), Freshness::Fresh);
    }

    #[tokio::test]
    async fn test_load_failure_empties_list() {
        let backend = MemoryBackend::new();
        backend.seed_patient(empty_patient());
        let list = controller(&backend);
        list.load().await.unwrap();
        assert_eq!(list.snapshot().patients.len(), 1);

        backend.fail(Op::ListPatients, BackendError::from_status(500, "down"));
        assert!(list.load().await.is_err());
        let state = list.snapshot();
        assert!(state.patients.is_empty());
        assert!(!state.patients.is_loading());
    }

    #[tokio::test]
    async fn test_add_refetches_once_and_closes_modal() {
        let backend = MemoryBackend::new();
        let list = controller(&backend);
        list.load().await.unwrap();
        backend.clear_calls();

        fill_jean(&list);
        assert_eq!(list.submit_add().await, Ok(Submission::Saved));

        assert_eq!(
            backend.calls(),
            vec!["POST /api/patient/insert", "GET /api/patient"]
        );
        let state = list.snapshot();
        assert!(!state.add.is_open());
        assert_eq!(state.add.draft(), &empty_patient());
        assert_eq!(state.patients.freshness(), Freshness::Fresh);

        let jean = &state.patients.items()[0];
        assert_eq!(jean.first_name, "Jean");
        assert_eq!(jean.age(), Some(current_year() - 1990));
    }

    #[tokio::test]
    async fn test_add_failure_keeps_modal_open_and_list_unchanged() {
        let backend = MemoryBackend::new();
        backend.seed_patient(empty_patient());
        let list = controller(&backend);
        list.load().await.unwrap();
        let before = list.snapshot().patients;
        backend.clear_calls();
        backend.fail(Op::CreatePatient, BackendError::from_status(400, "invalid"));

        fill_jean(&list);
        assert!(list.submit_add().await.is_err());

        assert_eq!(backend.calls(), vec!["POST /api/patient/insert"]);
        let state = list.snapshot();
        assert!(state.add.is_open());
        assert_eq!(state.add.draft().first_name, "Jean");
        assert_eq!(state.patients, before);
    }

    #[tokio::test]
    async fn test_no_optimistic_row_before_refetch() {
        let backend = MemoryBackend::new();
        let list = controller(&backend);
        list.load().await.unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        list.state()
            .subscribe(move |s| sink.borrow_mut().push((s.patients.len(), s.patients.is_loading())));

        fill_jean(&list);
        list.submit_add().await.unwrap();

        // Every snapshot before the refetch still shows an empty list.
        let seen = seen.borrow();
        let (last_len, last_loading) = *seen.last().unwrap();
        assert_eq!((last_len, last_loading), (1, false));
        assert!(seen[..seen.len() - 1].iter().all(|(len, _)| *len == 0));
    }

    #[tokio::test]
    async fn test_edit_refetches_once() {
        let backend = MemoryBackend::new();
        let id = backend.seed_patient(Patient {
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            birth_date: "1990-05-01".to_string(),
            ..empty_patient()
        });
        let list = controller(&backend);
        list.load().await.unwrap();
        backend.clear_calls();

        let row = list.snapshot().patients.items()[0].clone();
        list.open_edit(row);
        list.set_edit_field("address", "1 rue de Paris").unwrap();
        assert_eq!(list.submit_edit().await, Ok(Submission::Saved));

        assert_eq!(
            backend.calls(),
            vec![format!("PUT /api/patient/update/{id}"), "GET /api/patient".to_string()]
        );
        let state = list.snapshot();
        assert!(!state.edit.is_open());
        assert_eq!(
            state.patients.items()[0].address.as_deref(),
            Some("1 rue de Paris")
        );
    }

    #[tokio::test]
    async fn test_edit_without_id_is_a_no_op() {
        let backend = MemoryBackend::new();
        let list = controller(&backend);
        list.open_edit(empty_patient());
        assert_eq!(list.submit_edit().await, Ok(Submission::Skipped));
        assert!(backend.calls().is_empty());
        assert!(list.snapshot().edit.is_open());
    }

    #[tokio::test]
    async fn test_edit_failure_keeps_modal_open() {
        let backend = MemoryBackend::new();
        let id = backend.seed_patient(empty_patient());
        let list = controller(&backend);
        list.load().await.unwrap();
        backend.fail(Op::UpdatePatient, BackendError::Unauthorized);
        backend.clear_calls();

        list.open_edit(list.snapshot().patients.items()[0].clone());
        assert_eq!(list.submit_edit().await, Err(BackendError::Unauthorized));
        assert_eq!(backend.calls(), vec![format!("PUT /api/patient/update/{id}")]);
        assert!(list.snapshot().edit.is_open());
    }

    #[tokio::test]
    async fn test_delete_refetches_once() {
        let backend = MemoryBackend::new();
        let id = backend.seed_patient(empty_patient());
        backend.seed_patient(empty_patient());
        let list = controller(&backend);
        list.load().await.unwrap();
        backend.clear_calls();

        list.delete(&id).await.unwrap();
        assert_eq!(backend.count("GET /api/patient"), 1);
        assert_eq!(list.snapshot().patients.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_list() {
        let backend = MemoryBackend::new();
        let id = backend.seed_patient(empty_patient());
        let list = controller(&backend);
        list.load().await.unwrap();
        backend.fail(Op::DeletePatient, BackendError::Network("offline".to_string()));
        backend.clear_calls();

        assert!(list.delete(&id).await.is_err());
        assert_eq!(backend.count("GET /api/patient"), 0);
        assert_eq!(list.snapshot().patients.len(), 1);
    }

    #[tokio::test]
    async fn test_sequential_mutations_each_refetch() {
        let backend = MemoryBackend::new();
        let list = controller(&backend);
        list.load().await.unwrap();
        backend.clear_calls();

        fill_jean(&list);
        list.submit_add().await.unwrap();
        fill_jean(&list);
        list.submit_add().await.unwrap();

        assert_eq!(backend.count("GET /api/patient"), 2);
        assert_eq!(list.snapshot().patients.len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let backend = MemoryBackend::new();
        let list = controller(&backend);
        fill_jean(&list);
        list.close_add();
        let state = list.snapshot();
        assert!(!state.add.is_open());
        assert_eq!(state.add.draft(), &empty_patient());
    }

    #[tokio::test]
    async fn test_closed_view_ignores_late_results() {
        let backend = MemoryBackend::new();
        backend.seed_patient(empty_patient());
        let list = controller(&backend);
        list.close();
        list.load().await.unwrap();
        assert!(list.snapshot().patients.is_empty());
        assert!(list.snapshot().patients.is_loading());
    }
}
