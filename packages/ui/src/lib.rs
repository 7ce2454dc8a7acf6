//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const UI_CSS: Asset = asset!("/assets/medilabo.css");

mod auth;
pub use auth::{use_backend, use_session, AuthGuard};

mod observe;
pub use observe::use_observable;

pub mod display;
pub use display::{age_text, or_dash, risk_badge};

mod patient_table;
pub use patient_table::PatientTable;

mod patient_form;
pub use patient_form::PatientForm;

mod note_list;
pub use note_list::NoteList;

mod note_form;
pub use note_form::NoteForm;

mod assessment_panel;
pub use assessment_panel::AssessmentPanel;

pub mod activity_log;
pub use activity_log::{ActivityLog, LogLevel, log_activity, log_failure, use_activity_log};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
