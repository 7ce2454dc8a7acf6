//! # Client state for the Medilabo front end
//!
//! Everything here is independent of the UI framework and of HTTP:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Patient, note and assessment records as they travel on the wire. |
//! | [`backend`] | The [`Backend`] trait every controller calls. |
//! | [`collection`] | Fetched collections and the Fresh/Stale refresh flag. |
//! | [`forms`] | Add/Edit modal drafts. |
//! | [`observable`] | Single-threaded state with change notification and a view scope. |
//! | [`session`] | The session guard and the [`Session`] it hands out. |
//! | [`login`], [`patients`], [`record`] | One controller per view. |
//! | [`config`] | API base URL resolution. |

pub mod backend;
pub mod collection;
pub mod config;
pub mod error;
pub mod forms;
pub mod login;
pub mod models;
pub mod observable;
pub mod patients;
pub mod record;
pub mod routes;
pub mod session;

mod memory;
pub use memory::{MemoryBackend, Op};

pub use backend::Backend;
pub use collection::{Collection, Freshness, RefreshFlag};
pub use config::ClientConfig;
pub use error::{BackendError, ConfigError, FieldError};
pub use forms::{Draft, FormState, Submission};
pub use login::{Login, LoginState};
pub use models::{
    current_year, Assessment, Credentials, Gender, Note, NoteDraft, Patient, PatientAssessment,
    RiskLevel,
};
pub use observable::{Observable, Scope, SubscriptionId};
pub use patients::{empty_patient, PatientList, PatientListState};
pub use record::{PatientRecord, PatientRecordState};
pub use session::{GuardOutcome, Session, SessionGuard};
