use dioxus::prelude::*;
use store::Note;

use crate::icons::{FaPen, FaTrash};
use crate::Icon;

#[component]
pub fn NoteList(
    notes: Vec<Note>,
    on_edit: EventHandler<Note>,
    on_delete: EventHandler<String>,
) -> Element {
    if notes.is_empty() {
        return rsx! {
            div { class: "placeholder", "Aucune note" }
        };
    }

    rsx! {
        ul {
            class: "note-list",
            for note in notes {
                li {
                    key: "{note.id}",
                    class: "note-item",
                    p { class: "note-body", "{note.note}" }
                    div {
                        class: "note-actions",
                        button {
                            class: "icon-btn",
                            title: "Modifier",
                            onclick: {
                                let note = note.clone();
                                move |_| on_edit.call(note.clone())
                            },
                            Icon { icon: FaPen, width: 14, height: 14 }
                        }
                        button {
                            class: "icon-btn danger",
                            title: "Supprimer",
                            onclick: {
                                let id = note.id.clone();
                                move |_| on_delete.call(id.clone())
                            },
                            Icon { icon: FaTrash, width: 14, height: 14 }
                        }
                    }
                }
            }
        }
    }
}
