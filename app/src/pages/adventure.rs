//! Adventure Page
//!
//! Shows the running adventure (or a monster picker when there is none)
//! and the history of finished adventures.

use dioxus::prelude::*;
use habitquest_core::{MonsterView, QueryState};

use crate::api::{
    use_abandon_adventure, use_adventure_history, use_current_adventure, use_monsters,
    use_start_adventure,
};
use crate::components::{AdventureHistoryItem, HpBar, MonsterItem, TabBar, TabSpec, TierBadge};
use crate::types::{Adventure, AdventureId, AdventureTab};

#[component]
pub fn AdventurePage(on_open_result: EventHandler<AdventureId>) -> Element {
    let mut tab = use_signal(AdventureTab::default);
    let active = tab();

    let tabs = vec![
        TabSpec::new("Current", "fa-solid fa-dragon"),
        TabSpec::new("History", "fa-solid fa-scroll"),
    ];
    let active_index = match active {
        AdventureTab::Current => 0,
        AdventureTab::History => 1,
    };

    rsx! {
        div { class: "page adventure-page",
            TabBar {
                tabs,
                active: active_index,
                on_select: move |index: usize| {
                    tab.set(if index == 0 { AdventureTab::Current } else { AdventureTab::History });
                },
            }
            {match active {
                AdventureTab::Current => rsx! { CurrentAdventure { on_open_result } },
                AdventureTab::History => rsx! { AdventureHistory { on_open_result } },
            }}
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Current Adventure
// ─────────────────────────────────────────────────────────────────────────────

#[component]
fn CurrentAdventure(on_open_result: EventHandler<AdventureId>) -> Element {
    let current = use_current_adventure();

    match current {
        QueryState::Idle | QueryState::Loading => rsx! {
            div { class: "loading", "Loading adventure..." }
        },
        QueryState::Error(err) => {
            let message = err.user_message();
            rsx! {
                div { class: "error", "{message}" }
            }
        }
        QueryState::Success { data: Some(adventure), .. } => rsx! {
            ActiveAdventure { adventure, on_open_result }
        },
        QueryState::Success { data: None, .. } => rsx! { MonsterPicker {} },
    }
}

#[component]
fn ActiveAdventure(adventure: Adventure, on_open_result: EventHandler<AdventureId>) -> Element {
    let abandon = use_abandon_adventure();
    let mut confirming = use_signal(|| false);

    let monster = MonsterView::from_descriptor(adventure.monster.as_ref());
    let name = monster.name.to_string();
    let emoji = monster.emoji.to_string();
    let tier = monster.tier;
    let color = monster.color();
    let id = adventure.id;
    let finished = adventure.status.is_terminal();
    let ends = adventure
        .ends_at
        .map(|t| t.format("%b %-d").to_string())
        .unwrap_or_default();

    rsx! {
        div { class: "adventure-card",
            div { class: "adventure-monster",
                span { class: "monster-emoji", "{emoji}" }
                div { class: "monster-info",
                    h2 { class: "monster-name", "{name}" }
                    TierBadge { tier: Some(tier) }
                }
            }
            HpBar {
                current: adventure.monster_current_hp,
                max: adventure.monster_max_hp,
                color,
            }
            div { class: "adventure-stats",
                span { "Round {adventure.current_round}" }
                span { "{adventure.total_damage_dealt} damage dealt" }
                if !ends.is_empty() {
                    span { "Ends {ends}" }
                }
            }
            p { class: "hint", "Complete tasks to deal damage." }

            div { class: "adventure-actions",
                if finished {
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_open_result.call(id),
                        "See result"
                    }
                } else if confirming() {
                    span { "Retreat from {name}? You keep only half the XP." }
                    button {
                        class: "btn btn-danger",
                        disabled: abandon.is_pending(),
                        onclick: move |_| {
                            confirming.set(false);
                            abandon.mutate(id);
                        },
                        "Retreat"
                    }
                    button { class: "btn", onclick: move |_| confirming.set(false), "Keep fighting" }
                } else {
                    button {
                        class: "btn",
                        onclick: move |_| confirming.set(true),
                        i { class: "fa-solid fa-flag" }
                        " Abandon"
                    }
                }
            }
        }
    }
}

#[component]
fn MonsterPicker() -> Element {
    let monsters = use_monsters(true);
    let start = use_start_adventure();
    let busy = start.is_pending();

    let body = match monsters {
        QueryState::Idle | QueryState::Loading => rsx! {
            div { class: "loading", "Finding monsters..." }
        },
        QueryState::Error(err) => {
            let message = err.user_message();
            rsx! {
                div { class: "error", "{message}" }
            }
        }
        QueryState::Success { data, .. } if data.is_empty() => rsx! {
            div { class: "empty", "No monsters available right now." }
        },
        QueryState::Success { data, .. } => rsx! {
            ul { class: "list",
                for monster in data {
                    MonsterItem {
                        key: "{monster.id}",
                        monster: monster.clone(),
                        busy,
                        on_start: {
                            let id = monster.id;
                            move |_| start.mutate(id)
                        },
                    }
                }
            }
        },
    };

    rsx! {
        div { class: "monster-picker",
            h2 { "Choose your opponent" }
            {body}
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────────────────────────

#[component]
fn AdventureHistory(on_open_result: EventHandler<AdventureId>) -> Element {
    let history = use_adventure_history();

    match history {
        QueryState::Idle | QueryState::Loading => rsx! {
            div { class: "loading", "Loading history..." }
        },
        QueryState::Error(err) => {
            let message = err.user_message();
            rsx! {
                div { class: "error", "{message}" }
            }
        }
        QueryState::Success { data, .. } if data.is_empty() => rsx! {
            div { class: "empty", "No finished adventures yet." }
        },
        QueryState::Success { data, .. } => rsx! {
            ul { class: "list",
                for adventure in data {
                    AdventureHistoryItem {
                        key: "{adventure.id}",
                        on_open: {
                            let id = adventure.id;
                            move |_| on_open_result.call(id)
                        },
                        adventure: adventure.clone(),
                    }
                }
            }
        },
    }
}
