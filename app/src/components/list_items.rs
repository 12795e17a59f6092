//! List rows
//!
//! Pure rendering of one record each; actions are reported through
//! event handlers so the owning page decides which mutation runs.

use dioxus::prelude::*;
use habitquest_core::adventure::FALLBACK_MONSTER_EMOJI;
use habitquest_core::{MonsterView, hp_percent};

use crate::components::badges::{StatusBadge, StreakBadge, TierBadge};
use crate::types::{Adventure, FriendRequest, Monster, Task, UserSummary};
use crate::utils::{format_timestamp, pluralize};

// ─────────────────────────────────────────────────────────────────────────────
// Tasks
// ─────────────────────────────────────────────────────────────────────────────

#[component]
pub fn TaskItem(
    task: Task,
    busy: bool,
    on_complete: EventHandler<()>,
    on_delete: EventHandler<()>,
) -> Element {
    let done = task.completed_today;

    rsx! {
        li { class: if done { "list-item task-item done" } else { "list-item task-item" },
            div { class: "list-item-main",
                span { class: "list-item-title", "{task.title}" }
                if let Some(description) = task.description.as_ref() {
                    span { class: "list-item-sub", "{description}" }
                }
            }
            div { class: "list-item-meta",
                if !task.category.is_empty() {
                    span { class: "badge badge-category", "{task.category}" }
                }
                StreakBadge { days: task.streak }
                span { class: "list-item-xp", "+{task.xp_reward} XP" }
            }
            div { class: "list-item-actions",
                button {
                    class: "btn btn-primary",
                    disabled: done || busy,
                    onclick: move |_| on_complete.call(()),
                    i { class: "fa-solid fa-check" }
                    if done { " Done" } else { " Complete" }
                }
                button {
                    class: "btn btn-icon",
                    title: "Delete task",
                    disabled: busy,
                    onclick: move |_| on_delete.call(()),
                    i { class: "fa-solid fa-trash" }
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Adventures & Monsters
// ─────────────────────────────────────────────────────────────────────────────

#[component]
pub fn AdventureHistoryItem(adventure: Adventure, on_open: EventHandler<()>) -> Element {
    let monster = MonsterView::from_descriptor(adventure.monster.as_ref());
    let percent = format!(
        "{:.0}",
        hp_percent(adventure.monster_current_hp, adventure.monster_max_hp)
    );
    let rounds = pluralize(adventure.current_round, "round");

    rsx! {
        li {
            class: "list-item adventure-item clickable",
            onclick: move |_| on_open.call(()),
            span { class: "list-item-icon", "{monster.emoji}" }
            div { class: "list-item-main",
                span { class: "list-item-title", "{monster.name}" }
                span { class: "list-item-sub",
                    "{rounds} · {adventure.total_damage_dealt} damage · {percent}% HP left"
                }
            }
            div { class: "list-item-meta",
                TierBadge { tier: monster.tier }
                StatusBadge { status: adventure.status }
                span { class: "list-item-xp", "+{adventure.xp_earned} XP" }
            }
        }
    }
}

#[component]
pub fn MonsterItem(monster: Monster, busy: bool, on_start: EventHandler<()>) -> Element {
    let emoji = monster.emoji.as_deref().unwrap_or(FALLBACK_MONSTER_EMOJI);

    rsx! {
        li { class: "list-item monster-item",
            span { class: "list-item-icon", "{emoji}" }
            div { class: "list-item-main",
                span { class: "list-item-title", "{monster.name}" }
                if let Some(description) = monster.description.as_ref() {
                    span { class: "list-item-sub", "{description}" }
                }
            }
            div { class: "list-item-meta",
                TierBadge { tier: monster.tier }
                span { class: "list-item-sub", "{monster.max_hp} HP" }
            }
            button {
                class: "btn btn-primary",
                disabled: busy,
                onclick: move |_| on_start.call(()),
                "Fight"
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Users & Friends
// ─────────────────────────────────────────────────────────────────────────────

#[component]
pub fn FriendItem(friend: UserSummary) -> Element {
    let name = friend.shown_name().to_string();
    rsx! {
        li { class: "list-item friend-item",
            div { class: "list-item-main",
                span { class: "list-item-title", "{name}" }
                span { class: "list-item-sub", "@{friend.username}" }
            }
            span { class: "badge badge-level", "Lv {friend.level}" }
        }
    }
}

/// Incoming requests get accept/decline buttons; outgoing ones only show
/// their status.
#[component]
pub fn FriendRequestItem(
    request: FriendRequest,
    incoming: bool,
    busy: bool,
    on_accept: EventHandler<()>,
    on_decline: EventHandler<()>,
) -> Element {
    let other = if incoming { &request.from } else { &request.to };
    let name = other.shown_name().to_string();
    let sent = format_timestamp(request.created_at);

    rsx! {
        li { class: "list-item request-item",
            div { class: "list-item-main",
                span { class: "list-item-title", "{name}" }
                span { class: "list-item-sub",
                    if incoming { "wants to be friends · {sent}" } else { "invite sent · {sent}" }
                }
            }
            if incoming {
                div { class: "list-item-actions",
                    button {
                        class: "btn btn-primary",
                        disabled: busy,
                        onclick: move |_| on_accept.call(()),
                        "Accept"
                    }
                    button {
                        class: "btn",
                        disabled: busy,
                        onclick: move |_| on_decline.call(()),
                        "Decline"
                    }
                }
            } else {
                span { class: "badge badge-pending", "Pending" }
            }
        }
    }
}

#[component]
pub fn UserSearchItem(user: UserSummary, busy: bool, on_invite: EventHandler<()>) -> Element {
    let name = user.shown_name().to_string();
    rsx! {
        li { class: "list-item user-item",
            div { class: "list-item-main",
                span { class: "list-item-title", "{name}" }
                span { class: "list-item-sub", "@{user.username}" }
            }
            span { class: "badge badge-level", "Lv {user.level}" }
            button {
                class: "btn btn-primary",
                disabled: busy,
                onclick: move |_| on_invite.call(()),
                i { class: "fa-solid fa-user-plus" }
                " Invite"
            }
        }
    }
}
