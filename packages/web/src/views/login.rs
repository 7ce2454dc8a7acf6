//! Login page: username/password posted to the gateway.

use dioxus::prelude::*;
use ui::{log_activity, log_failure, use_activity_log, use_backend, use_observable, LogLevel};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let backend = use_backend();
    let nav = use_navigator();
    let mut activity_log = use_activity_log();
    let form = use_hook(|| store::Login::new(backend));
    let state = use_observable(form.state());

    use_drop({
        let form = form.clone();
        move || form.close()
    });

    let handle_submit = {
        let form = form.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let form = form.clone();
            spawn(async move {
                match form.submit().await {
                    Ok(()) => {
                        log_activity(&mut activity_log, LogLevel::Success, "Connexion réussie");
                        nav.push(Route::PatientList {});
                    }
                    Err(e) => log_failure(&mut activity_log, "Connexion", &e),
                }
            });
        }
    };

    let on_username = {
        let form = form.clone();
        move |evt: FormEvent| form.set_username(&evt.value())
    };
    let on_password = {
        let form = form.clone();
        move |evt: FormEvent| form.set_password(&evt.value())
    };

    let current = state();

    rsx! {
        div {
            class: "login-container",
            h1 { "Medilabo" }
            p { class: "login-subtitle", "Connectez-vous pour accéder aux dossiers patients" }

            form {
                class: "login-form",
                onsubmit: handle_submit,
                label {
                    class: "field",
                    span { "Identifiant" }
                    input {
                        r#type: "text",
                        name: "username",
                        autocomplete: "username",
                        value: "{current.credentials.username}",
                        oninput: on_username,
                    }
                }
                label {
                    class: "field",
                    span { "Mot de passe" }
                    input {
                        r#type: "password",
                        name: "password",
                        autocomplete: "current-password",
                        value: "{current.credentials.password}",
                        oninput: on_password,
                    }
                }
                button {
                    r#type: "submit",
                    class: "btn primary",
                    if current.submitting { "Connexion…" } else { "Se connecter" }
                }
            }
        }
    }
}
