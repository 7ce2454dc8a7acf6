//! One patient: identity card, notes and the diabetes risk assessment.

use dioxus::prelude::*;
use store::{current_year, Note, Patient, Submission};
use ui::icons::{FaArrowLeft, FaPlus};
use ui::{
    age_text, log_activity, log_failure, or_dash, risk_badge, use_activity_log, use_backend,
    use_observable, use_session, AssessmentPanel, Icon, LogLevel, NoteForm, NoteList,
};

use crate::Route;

/// Routed entry point. Keyed on `id` so a different patient gets a fresh
/// controller instead of reusing the previous one.
#[component]
pub fn PatientDetail(id: String) -> Element {
    rsx! {
        PatientRecordView { key: "{id}", id: id.clone() }
    }
}

#[component]
fn PatientRecordView(id: String) -> Element {
    let backend = use_backend();
    let session = use_session();
    let mut activity_log = use_activity_log();
    let record = use_hook(|| store::PatientRecord::new(backend, &session, &id));
    let state = use_observable(record.state());

    use_hook({
        let record = record.clone();
        move || {
            spawn(async move {
                if let Err(e) = record.load().await {
                    log_failure(&mut activity_log, "Chargement du dossier", &e);
                }
            })
        }
    });

    use_drop({
        let record = record.clone();
        move || record.close()
    });

    let current = state();

    let back = rsx! {
        Link {
            to: Route::PatientList {},
            class: "back-link",
            Icon { icon: FaArrowLeft, width: 12, height: 12 }
            " Retour à la liste"
        }
    };

    if current.loading {
        return rsx! {
            {back}
            div { class: "placeholder", "Chargement…" }
        };
    }
    let Some(patient) = current.patient.clone() else {
        return rsx! {
            {back}
            div { class: "placeholder", "Patient introuvable" }
        };
    };

    let on_edit_note = {
        let record = record.clone();
        move |note: Note| record.open_edit_note(note)
    };

    let on_delete_note = {
        let record = record.clone();
        move |note_id: String| {
            let record = record.clone();
            spawn(async move {
                match record.delete_note(&note_id).await {
                    Ok(()) => log_activity(&mut activity_log, LogLevel::Success, "Note supprimée"),
                    Err(e) => log_failure(&mut activity_log, "Suppression de la note", &e),
                }
            });
        }
    };

    let on_assess = {
        let record = record.clone();
        move |_| {
            let record = record.clone();
            spawn(async move {
                if let Err(e) = record.request_assessment().await {
                    log_failure(&mut activity_log, "Évaluation du risque", &e);
                }
            });
        }
    };

    let open_add_note = {
        let record = record.clone();
        move |_| record.open_add_note()
    };

    rsx! {
        section {
            class: "page",
            {back}

            PatientCard { patient }

            div {
                class: "page-header",
                h2 { "Notes" }
                button {
                    class: "btn primary",
                    onclick: open_add_note,
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Ajouter une note"
                }
            }
            NoteList {
                notes: current.notes.items().to_vec(),
                on_edit: on_edit_note,
                on_delete: on_delete_note,
            }

            AssessmentPanel {
                assessment: current.assessment.clone(),
                assessing: current.assessing,
                on_request: on_assess,
            }
        }

        if current.add_note.is_open() {
            NoteForm {
                title: "Nouvelle note",
                draft: current.add_note.draft().clone(),
                on_input: {
                    let record = record.clone();
                    move |value: String| {
                        if let Err(e) = record.set_add_note_field("note", &value) {
                            tracing::warn!("note form: {e}");
                        }
                    }
                },
                on_submit: {
                    let record = record.clone();
                    move |_| {
                        let record = record.clone();
                        spawn(async move {
                            match record.submit_add_note().await {
                                Ok(_) => log_activity(&mut activity_log, LogLevel::Success, "Note ajoutée"),
                                Err(e) => log_failure(&mut activity_log, "Ajout de la note", &e),
                            }
                        });
                    }
                },
                on_cancel: {
                    let record = record.clone();
                    move |_| record.close_add_note()
                },
            }
        }

        if current.edit_note.is_open() {
            NoteForm {
                title: "Modifier la note",
                draft: current.edit_note.draft().clone(),
                on_input: {
                    let record = record.clone();
                    move |value: String| {
                        if let Err(e) = record.set_edit_note_field("note", &value) {
                            tracing::warn!("note form: {e}");
                        }
                    }
                },
                on_submit: {
                    let record = record.clone();
                    move |_| {
                        let record = record.clone();
                        spawn(async move {
                            match record.submit_edit_note().await {
                                Ok(Submission::Saved) => {
                                    log_activity(&mut activity_log, LogLevel::Success, "Note modifiée")
                                }
                                Ok(Submission::Skipped) => {}
                                Err(e) => log_failure(&mut activity_log, "Modification de la note", &e),
                            }
                        });
                    }
                },
                on_cancel: {
                    let record = record.clone();
                    move |_| record.close_edit_note()
                },
            }
        }
    }
}

#[component]
fn PatientCard(patient: Patient) -> Element {
    let age = age_text(&patient, current_year());
    let address = or_dash(patient.address.as_deref());
    let phone = or_dash(patient.phone.as_deref());
    let (risk_label, risk_class) = risk_badge(patient.risk.as_deref());

    rsx! {
        div {
            class: "patient-card",
            h1 { "{patient.full_name()}" }
            dl {
                dt { "Date de naissance" }
                dd { "{patient.birth_date}" }
                dt { "Âge" }
                dd { "{age}" }
                dt { "Genre" }
                dd { "{patient.gender.label()}" }
                dt { "Adresse" }
                dd { "{address}" }
                dt { "Téléphone" }
                dd { "{phone}" }
                dt { "Risque" }
                dd { span { class: risk_class, "{risk_label}" } }
            }
        }
    }
}
