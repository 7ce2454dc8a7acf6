use dioxus::prelude::*;
use store::{current_year, Patient};

use crate::display::{age_text, risk_badge};

use crate::icons::{FaEye, FaPen, FaTrash};
use crate::Icon;

/// Patient rows with view / edit / delete actions.
#[component]
pub fn PatientTable(
    patients: Vec<Patient>,
    loading: bool,
    on_view: EventHandler<String>,
    on_edit: EventHandler<Patient>,
    on_delete: EventHandler<String>,
) -> Element {
    if loading {
        return rsx! {
            div { class: "placeholder", "Chargement des patients…" }
        };
    }
    if patients.is_empty() {
        return rsx! {
            div { class: "placeholder", "Aucun patient trouvé" }
        };
    }

    let year = current_year();

    rsx! {
        table {
            class: "patient-table",
            thead {
                tr {
                    th { "Nom" }
                    th { "Prénom" }
                    th { "Âge" }
                    th { "Risque" }
                    th { class: "actions", "Actions" }
                }
            }
            tbody {
                for patient in patients {
                    PatientRow {
                        key: "{patient.id.clone().unwrap_or_default()}",
                        patient: patient.clone(),
                        year,
                        on_view,
                        on_edit,
                        on_delete,
                    }
                }
            }
        }
    }
}

#[component]
fn PatientRow(
    patient: Patient,
    year: i32,
    on_view: EventHandler<String>,
    on_edit: EventHandler<Patient>,
    on_delete: EventHandler<String>,
) -> Element {
    let id = patient.id.clone().unwrap_or_default();
    let age = age_text(&patient, year);
    let (risk_label, risk_class) = risk_badge(patient.risk.as_deref());

    rsx! {
        tr {
            td { "{patient.last_name}" }
            td { "{patient.first_name}" }
            td { "{age}" }
            td { span { class: risk_class, "{risk_label}" } }
            td {
                class: "actions",
                button {
                    class: "icon-btn",
                    title: "Voir",
                    onclick: {
                        let id = id.clone();
                        move |_| on_view.call(id.clone())
                    },
                    Icon { icon: FaEye, width: 14, height: 14 }
                }
                button {
                    class: "icon-btn",
                    title: "Modifier",
                    onclick: {
                        let patient = patient.clone();
                        move |_| on_edit.call(patient.clone())
                    },
                    Icon { icon: FaPen, width: 14, height: 14 }
                }
                button {
                    class: "icon-btn danger",
                    title: "Supprimer",
                    onclick: move |_| on_delete.call(id.clone()),
                    Icon { icon: FaTrash, width: 14, height: 14 }
                }
            }
        }
    }
}
