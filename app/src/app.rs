#![allow(non_snake_case)]

use dioxus::prelude::*;
use habitquest_core::QueryState;

use crate::api::{use_me, use_query_client, use_query_client_provider};
use crate::components::{LevelBadge, StreakBadge, TabBar, TabSpec, ToastFrame, use_toast_provider};
use crate::pages::{AdventurePage, AdventureResultPage, FriendsPage, SignInPanel, TasksPage};
use crate::session::{use_session, use_session_provider};
use crate::types::{AdventureId, Page};

static CSS: Asset = asset!("/assets/styles.css");

// ─────────────────────────────────────────────────────────────────────────────
// App Component
// ─────────────────────────────────────────────────────────────────────────────

pub fn App() -> Element {
    use_toast_provider();
    let session = use_session_provider();
    use_query_client_provider();

    rsx! {
        document::Stylesheet { href: CSS }
        document::Stylesheet {
            href: "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css",
        }
        div { class: "app",
            if session.is_signed_in() {
                Shell {}
            } else {
                SignInPanel {}
            }
        }
        ToastFrame {}
    }
}

/// Header, navigation and the current page
#[component]
fn Shell() -> Element {
    let mut page = use_signal(Page::default);
    let current = page();

    let tabs: Vec<TabSpec> = Page::nav()
        .iter()
        .map(|p| TabSpec::new(p.label(), p.icon()))
        .collect();

    rsx! {
        Header {}
        nav { class: "main-nav",
            TabBar {
                tabs,
                active: current.nav_index(),
                on_select: move |index: usize| {
                    if let Some(next) = Page::nav().get(index) {
                        page.set(*next);
                    }
                },
            }
        }
        main { class: "content",
            {match current {
                Page::Adventure => rsx! {
                    AdventurePage { on_open_result: move |id: AdventureId| page.set(Page::AdventureResult(id)) }
                },
                Page::AdventureResult(id) => rsx! {
                    AdventureResultPage { key: "{id}", id, on_back: move |_| page.set(Page::Adventure) }
                },
                Page::Tasks => rsx! { TasksPage {} },
                Page::Friends => rsx! { FriendsPage {} },
            }}
        }
    }
}

#[component]
fn Header() -> Element {
    let mut session = use_session();
    let client = use_query_client();
    let me = use_me();

    let profile = match &me {
        QueryState::Success { data, .. } => {
            let name = data.shown_name().to_string();
            rsx! {
                span { class: "header-user", "{name}" }
                LevelBadge { level: data.level, xp: data.xp }
                StreakBadge { days: data.current_streak }
            }
        }
        QueryState::Error(_) => rsx! {
            span { class: "header-user muted", "Profile unavailable" }
        },
        QueryState::Idle | QueryState::Loading => rsx! {},
    };

    rsx! {
        header { class: "app-header",
            span { class: "app-title",
                i { class: "fa-solid fa-shield-halved" }
                " HabitQuest"
            }
            div { class: "header-profile",
                {profile}
                button {
                    class: "btn btn-icon",
                    title: "Sign out",
                    onclick: move |_| {
                        session.sign_out();
                        client.clear();
                    },
                    i { class: "fa-solid fa-right-from-bracket" }
                }
            }
        }
    }
}
