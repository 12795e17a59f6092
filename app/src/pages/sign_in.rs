use dioxus::prelude::*;

use crate::api::use_query_client;
use crate::session::use_session;

/// Shown while no token is stored. The token comes from the backend's
/// login page and is pasted here once.
#[component]
pub fn SignInPanel() -> Element {
    let mut session = use_session();
    let client = use_query_client();
    let mut raw = use_signal(String::new);
    let mut rejected = use_signal(|| false);

    rsx! {
        div { class: "page sign-in-page",
            h1 { "HabitQuest" }
            p { "Paste the access token from your account page to continue." }
            if !client.is_configured() {
                div { class: "error", "The server address is not configured." }
            }
            form {
                class: "sign-in-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    let accepted = session.sign_in(&raw.peek());
                    rejected.set(!accepted);
                    if accepted {
                        raw.set(String::new());
                    }
                },
                input {
                    r#type: "password",
                    placeholder: "Access token",
                    value: "{raw}",
                    oninput: move |e| raw.set(e.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Sign in" }
            }
            if rejected() {
                div { class: "error", "That token is empty." }
            }
        }
    }
}
