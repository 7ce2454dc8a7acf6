//! # API crate — REST client for the Medilabo services
//!
//! The front end never talks to a database or computes anything on its own;
//! every read and write is a credentialed HTTP call to the Medilabo gateway.
//! This crate provides [`ApiClient`], the `reqwest` implementation of
//! [`store::Backend`] used by the web application.
//!
//! ## Endpoints
//!
//! | Method | Path | [`store::Backend`] method |
//! |--------|------|---------------------------|
//! | POST | `/login` (form) | `login` |
//! | GET | `/api/patient` | `check_session`, `list_patients` |
//! | GET | `/api/patient/:id` | `get_patient` |
//! | POST | `/api/patient/insert` | `create_patient` |
//! | PUT | `/api/patient/update/:id` | `update_patient` |
//! | DELETE | `/api/patient/delete/:id` | `delete_patient` |
//! | GET | `/api/note/:patientId` | `list_notes` |
//! | POST | `/api/note/insert` | `create_note` |
//! | PUT | `/api/note/update/:id` | `update_note` |
//! | DELETE | `/api/note/delete/:id` | `delete_note` |
//! | GET | `/api/assess/:patientId` | `assess` |
//!
//! ## Status mapping
//!
//! Any 2xx is success. 401, 404, other 4xx and 5xx map onto the matching
//! [`store::BackendError`] variant; transport failures become
//! `BackendError::Network`.

mod client;

pub use client::ApiClient;
pub use store::{BackendError, ClientConfig};
