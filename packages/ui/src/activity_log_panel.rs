use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, LogEntry, LogLevel};

const ACTIVITY_LOG_CSS: Asset = asset!("/assets/styling/activity_log.css");

/// Newest-first list of gateway calls. Hidden until toggled.
#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();

    let snapshot = log();
    if !snapshot.visible {
        return rsx! {};
    }

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        aside {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                span { "Journal d'activité" }
                div {
                    class: "activity-log-header-actions",
                    button {
                        onclick: move |_| log.write().entries.clear(),
                        "Vider"
                    }
                    button {
                        onclick: move |_| log.write().visible = false,
                        "Fermer"
                    }
                }
            }
            ol {
                class: "activity-log-entries",
                if snapshot.entries.is_empty() {
                    li { class: "activity-log-empty", "Aucun appel pour le moment" }
                }
                for entry in snapshot.entries.iter().rev() {
                    ActivityLogRow { entry: entry.clone() }
                }
            }
        }
    }
}

#[component]
fn ActivityLogRow(entry: LogEntry) -> Element {
    let class = match entry.level {
        LogLevel::Error => "activity-log-entry error",
        LogLevel::Warning => "activity-log-entry warning",
        LogLevel::Success => "activity-log-entry success",
    };

    rsx! {
        li {
            class,
            span { class: "activity-log-time", "{entry.timestamp}" }
            span { class: "activity-log-action", "{entry.action}" }
            if let Some(kind) = entry.failure {
                span { class: "activity-log-kind", "{kind.label()}" }
            }
            if let Some(detail) = entry.detail {
                div { class: "activity-log-detail", "{detail}" }
            }
        }
    }
}

/// Floating button showing how many calls failed.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let failures = log().failure_count();

    rsx! {
        button {
            class: if failures > 0 { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            title: "Journal d'activité",
            onclick: move |_| {
                let visible = log().visible;
                log.write().visible = !visible;
            },
            if failures > 0 { "{failures} échec(s)" } else { "Journal" }
        }
    }
}
