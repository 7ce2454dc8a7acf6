use dioxus::prelude::*;
use store::NoteDraft;

use crate::views::ModalOverlay;

/// Add/Edit note modal.
#[component]
pub fn NoteForm(
    title: String,
    draft: NoteDraft,
    on_input: EventHandler<String>,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
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
                label {
                    class: "field",
                    span { "Note" }
                    textarea {
                        rows: 6,
                        value: "{draft.note}",
                        oninput: move |evt: FormEvent| on_input.call(evt.value()),
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
