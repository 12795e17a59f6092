//! Friends Page
//!
//! Three tabs: the friend list, pending requests, and a debounced user
//! search whose results can be invited by id.

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use habitquest_core::{Debouncer, QueryState, keys, normalize_search};

use crate::api::{
    use_answer_friend_request, use_friend_requests, use_friends, use_me, use_query_client,
    use_send_friend_request, use_user_search,
};
use crate::components::{FriendItem, FriendRequestItem, TabBar, TabSpec, UserSearchItem};
use crate::types::{FriendRequestDecision, FriendRequestStatus, FriendsTab, UserId};

#[component]
pub fn FriendsPage() -> Element {
    let mut tab = use_signal(FriendsTab::default);
    let active = tab();

    let me = use_me();
    let my_id = me.data().map(|user| user.id);
    let requests = use_friend_requests();
    let incoming = match (requests.data(), my_id) {
        (Some(list), Some(id)) => list.iter().filter(|r| r.awaits(id)).count(),
        _ => 0,
    };

    let tabs: Vec<TabSpec> = FriendsTab::all()
        .iter()
        .map(|t| {
            let tab = TabSpec::new(t.label(), t.icon());
            if *t == FriendsTab::Requests { tab.with_count(incoming) } else { tab }
        })
        .collect();
    let active_index = FriendsTab::all()
        .iter()
        .position(|t| *t == active)
        .unwrap_or(0);

    rsx! {
        div { class: "page friends-page",
            TabBar {
                tabs,
                active: active_index,
                on_select: move |index: usize| {
                    if let Some(next) = FriendsTab::all().get(index) {
                        tab.set(*next);
                    }
                },
            }
            {match active {
                FriendsTab::Friends => rsx! { FriendList {} },
                FriendsTab::Requests => rsx! { RequestList { my_id } },
                FriendsTab::AddFriend => rsx! { AddFriend {} },
            }}
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Friend List
// ─────────────────────────────────────────────────────────────────────────────

#[component]
fn FriendList() -> Element {
    match use_friends() {
        QueryState::Idle | QueryState::Loading => rsx! {
            div { class: "loading", "Loading friends..." }
        },
        QueryState::Error(err) => {
            let message = err.user_message();
            rsx! {
                div { class: "error", "{message}" }
            }
        }
        QueryState::Success { data, .. } if data.is_empty() => rsx! {
            div { class: "empty", "No friends yet. Find someone under Add Friend." }
        },
        QueryState::Success { data, .. } => rsx! {
            ul { class: "list",
                for friend in data {
                    FriendItem { key: "{friend.id}", friend: friend.clone() }
                }
            }
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

#[component]
fn RequestList(my_id: Option<UserId>) -> Element {
    let requests = use_friend_requests();
    let answer = use_answer_friend_request();
    let busy = answer.is_pending();

    match requests {
        QueryState::Idle | QueryState::Loading => rsx! {
            div { class: "loading", "Loading requests..." }
        },
        QueryState::Error(err) => {
            let message = err.user_message();
            rsx! {
                div { class: "error", "{message}" }
            }
        }
        QueryState::Success { data, .. } => {
            let pending: Vec<_> = data
                .into_iter()
                .filter(|r| r.status == FriendRequestStatus::Pending)
                .collect();
            if pending.is_empty() {
                return rsx! {
                    div { class: "empty", "No pending requests." }
                };
            }
            rsx! {
                ul { class: "list",
                    for request in pending {
                        FriendRequestItem {
                            key: "{request.id}",
                            incoming: my_id.is_some_and(|id| request.awaits(id)),
                            busy,
                            on_accept: {
                                let id = request.id;
                                move |_| answer.mutate((id, FriendRequestDecision::Accept))
                            },
                            on_decline: {
                                let id = request.id;
                                move |_| answer.mutate((id, FriendRequestDecision::Decline))
                            },
                            request: request.clone(),
                        }
                    }
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Add Friend
// ─────────────────────────────────────────────────────────────────────────────

#[component]
fn AddFriend() -> Element {
    let client = use_query_client();
    let invite = use_send_friend_request();
    let mut input = use_signal(String::new);
    let mut debouncer = use_signal(Debouncer::new);

    let query = normalize_search(debouncer.read().committed(), client.min_search_len);
    let searching = query.is_some();
    let results = use_user_search(query);

    // Only the committed search stays cached; all of them go on unmount
    use_effect(move || {
        let committed = normalize_search(debouncer.read().committed(), client.min_search_len);
        let keep = committed.as_deref().map(keys::user_search);
        client.prune(&keys::user_searches(), keep.as_ref());
    });
    use_drop(move || client.prune(&keys::user_searches(), None));

    let on_input = move |e: FormEvent| {
        let value = e.value();
        input.set(value.clone());
        let ticket = debouncer.write().input();
        let delay = client.search_debounce_ms;
        spawn(async move {
            TimeoutFuture::new(delay).await;
            debouncer.write().commit(ticket, value);
        });
    };

    let body = match results {
        _ if !searching => rsx! {
            div { class: "hint",
                "Type at least {client.min_search_len} characters to search by username."
            }
        },
        QueryState::Idle | QueryState::Loading => rsx! {
            div { class: "loading", "Searching..." }
        },
        QueryState::Error(err) => {
            let message = err.user_message();
            rsx! {
                div { class: "error", "{message}" }
            }
        }
        QueryState::Success { data, .. } if data.is_empty() => rsx! {
            div { class: "empty", "No users found." }
        },
        QueryState::Success { data, .. } => rsx! {
            ul { class: "list",
                for user in data {
                    UserSearchItem {
                        key: "{user.id}",
                        busy: invite.is_pending(),
                        on_invite: {
                            let id = user.id;
                            move |_| invite.mutate(id)
                        },
                        user: user.clone(),
                    }
                }
            }
        },
    };

    rsx! {
        div { class: "add-friend",
            form {
                class: "search-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    debouncer.write().flush(input.peek().clone());
                },
                input {
                    r#type: "search",
                    placeholder: "Search by username",
                    value: "{input}",
                    oninput: on_input,
                }
            }
            {body}
        }
    }
}
