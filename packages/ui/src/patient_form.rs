use dioxus::prelude::*;
use store::{Gender, Patient};

use crate::views::ModalOverlay;

/// Add/Edit patient modal. Every keystroke is reported as `(field, value)`
/// using the wire field names (`firstName`, `birthDate`, ...).
#[component]
pub fn PatientForm(
    title: String,
    draft: Patient,
    on_field: EventHandler<(String, String)>,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let address = draft.address.clone().unwrap_or_default();
    let phone = draft.phone.clone().unwrap_or_default();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_cancel.call(()),
            form {
                class: "modal-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    on_submit.call(());
                },
                h2 { "{title}" }

                TextField { label: "Prénom", name: "firstName", value: draft.first_name.clone(), on_field }
                TextField { label: "Nom", name: "lastName", value: draft.last_name.clone(), on_field }
                TextField { label: "Date de naissance", name: "birthDate", value: draft.birth_date.clone(), input_type: "date", on_field }
                TextField { label: "Adresse", name: "address", value: address, on_field }
                TextField { label: "Téléphone", name: "phone", value: phone, input_type: "tel", on_field }

                label {
                    class: "field",
                    span { "Genre" }
                    select {
                        value: draft.gender.as_str(),
                        onchange: move |evt| on_field.call(("gender".to_string(), evt.value())),
                        for gender in [Gender::Male, Gender::Female] {
                            option {
                                value: gender.as_str(),
                                selected: gender == draft.gender,
                                "{gender.label()}"
                            }
                        }
                    }
                }

                div {
                    class: "modal-actions",
                    button {
                        r#type: "button",
                        class: "btn secondary",
                        onclick: move |_| on_cancel.call(()),
                        "Annuler"
                    }
                    button { r#type: "submit", class: "btn primary", "Enregistrer" }
                }
            }
        }
    }
}

#[component]
fn TextField(
    label: String,
    name: String,
    value: String,
    #[props(default = "text".to_string())] input_type: String,
    on_field: EventHandler<(String, String)>,
) -> Element {
    rsx! {
        label {
            class: "field",
            span { "{label}" }
            input {
                r#type: "{input_type}",
                name: "{name}",
                value: "{value}",
                oninput: move |evt: FormEvent| on_field.call((name.clone(), evt.value())),
            }
        }
    }
}
