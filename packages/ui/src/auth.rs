//! Session guard and context hooks for protected views.

use api::ApiClient;
use dioxus::prelude::*;
use store::{GuardOutcome, Session, SessionGuard};

use crate::activity_log::{log_activity, use_activity_log, LogLevel};

/// The shared API client, provided once by the application root.
pub fn use_backend() -> ApiClient {
    use_context::<ApiClient>()
}

/// The session handed out by the enclosing [`AuthGuard`].
///
/// Only components rendered below a guard that passed can call this.
pub fn use_session() -> Session {
    use_context::<Session>()
}

#[derive(Clone, Debug, PartialEq)]
enum GuardStatus {
    Checking,
    Passed(Session),
    Refused,
}

/// Checks the session once on mount and renders `children` only if it is
/// still valid. Otherwise `on_unauthenticated` fires and nothing renders.
#[component]
pub fn AuthGuard(on_unauthenticated: EventHandler<()>, children: Element) -> Element {
    let backend = use_backend();
    let mut status = use_signal(|| GuardStatus::Checking);
    let mut log = use_activity_log();

    use_hook(move || {
        spawn(async move {
            match SessionGuard::new(backend).check().await {
                GuardOutcome::Authenticated(session) => status.set(GuardStatus::Passed(session)),
                GuardOutcome::Redirect => {
                    log_activity(&mut log, LogLevel::Warning, "Session invalide, connexion requise");
                    status.set(GuardStatus::Refused);
                    on_unauthenticated.call(());
                }
            }
        })
    });

    match status() {
        GuardStatus::Checking => rsx! {
            div { class: "guard-pending", "🔒 Chargement…" }
        },
        GuardStatus::Refused => rsx! {},
        GuardStatus::Passed(session) => rsx! {
            SessionScope { session, {children} }
        },
    }
}

#[component]
fn SessionScope(session: Session, children: Element) -> Element {
    use_context_provider(move || session);
    rsx! {
        {children}
    }
}
