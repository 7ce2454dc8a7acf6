use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::{ActivityLog, ActivityLogPanel, ActivityLogToggle, AuthGuard};
use views::{Login, PatientDetail, PatientList};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[layout(Protected)]
        #[route("/")]
        PatientList {},
        #[route("/patient/:id")]
        PatientDetail { id: String },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("failed to initialise logger: {e}");
    }

    let client = match api::ApiClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("cannot build API client: {e}");
            return;
        }
    };
    tracing::info!(api = client.base_url(), "starting Medilabo front end");

    dioxus::LaunchBuilder::new().with_context(client).launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| Signal::new(ActivityLog::default()));

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::UI_CSS }

        Router::<Route> {}

        ActivityLogPanel {}
        ActivityLogToggle {}
    }
}

/// Guards every route below it. The session check runs once when the layout mounts;
/// moving between protected routes keeps the session.
#[component]
fn Protected() -> Element {
    let nav = use_navigator();

    rsx! {
        header {
            class: "app-header",
            Link { to: Route::PatientList {}, class: "brand", "Medilabo" }
        }
        main {
            class: "app-main",
            AuthGuard {
                on_unauthenticated: move |_| {
                    nav.replace(Route::Login {});
                },
                Outlet::<Route> {}
            }
        }
    }
}
