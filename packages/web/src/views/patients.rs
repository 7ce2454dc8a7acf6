//! Home view: the patient table and its Add/Edit modals.

use dioxus::prelude::*;
use store::{Patient, Submission};
use ui::icons::FaPlus;
use ui::{
    log_activity, log_failure, use_activity_log, use_backend, use_observable, use_session, Icon,
    LogLevel, PatientForm, PatientTable,
};

use crate::Route;

#[component]
pub fn PatientList() -> Element {
    let backend = use_backend();
    let session = use_session();
    let nav = use_navigator();
    let mut activity_log = use_activity_log();
    let list = use_hook(|| store::PatientList::new(backend, &session));
    let state = use_observable(list.state());

    use_hook({
        let list = list.clone();
        move || {
            spawn(async move {
                if let Err(e) = list.load().await {
                    log_failure(&mut activity_log, "Chargement des patients", &e);
                }
            })
        }
    });

    use_drop({
        let list = list.clone();
        move || list.close()
    });

    let on_view = move |id: String| {
        nav.push(Route::PatientDetail { id });
    };

    let on_edit = {
        let list = list.clone();
        move |patient: Patient| list.open_edit(patient)
    };

    let on_delete = {
        let list = list.clone();
        move |id: String| {
            let list = list.clone();
            spawn(async move {
                match list.delete(&id).await {
                    Ok(()) => log_activity(&mut activity_log, LogLevel::Success, "Patient supprimé"),
                    Err(e) => log_failure(&mut activity_log, "Suppression du patient", &e),
                }
            });
        }
    };

    let open_add = {
        let list = list.clone();
        move |_| list.open_add()
    };

    let current = state();
    let add_open = current.add.is_open();
    let edit_open = current.edit.is_open();

    rsx! {
        section {
            class: "page",
            div {
                class: "page-header",
                h1 { "Patients" }
                button {
                    class: "btn primary",
                    onclick: open_add,
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Ajouter"
                }
            }

            PatientTable {
                patients: current.patients.items().to_vec(),
                loading: current.patients.is_loading(),
                on_view,
                on_edit,
                on_delete,
            }
        }

        if add_open {
            PatientForm {
                title: "Ajouter un patient",
                draft: current.add.draft().clone(),
                on_field: {
                    let list = list.clone();
                    move |(name, value): (String, String)| {
                        if let Err(e) = list.set_add_field(&name, &value) {
                            tracing::warn!("add form: {e}");
                        }
                    }
                },
                on_submit: {
                    let list = list.clone();
                    move |_| {
                        let list = list.clone();
                        spawn(async move {
                            match list.submit_add().await {
                                Ok(_) => log_activity(&mut activity_log, LogLevel::Success, "Patient ajouté"),
                                Err(e) => log_failure(&mut activity_log, "Ajout du patient", &e),
                            }
                        });
                    }
                },
                on_cancel: {
                    let list = list.clone();
                    move |_| list.close_add()
                },
            }
        }

        if edit_open {
            PatientForm {
                title: "Modifier le patient",
                draft: current.edit.draft().clone(),
                on_field: {
                    let list = list.clone();
                    move |(name, value): (String, String)| {
                        if let Err(e) = list.set_edit_field(&name, &value) {
                            tracing::warn!("edit form: {e}");
                        }
                    }
                },
                on_submit: {
                    let list = list.clone();
                    move |_| {
                        let list = list.clone();
                        spawn(async move {
                            match list.submit_edit().await {
                                Ok(Submission::Saved) => {
                                    log_activity(&mut activity_log, LogLevel::Success, "Patient modifié")
                                }
                                Ok(Submission::Skipped) => {}
                                Err(e) => log_failure(&mut activity_log, "Modification du patient", &e),
                            }
                        });
                    }
                },
                on_cancel: {
                    let list = list.clone();
                    move |_| list.close_edit()
                },
            }
        }
    }
}
