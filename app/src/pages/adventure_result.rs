//! Adventure Result Page
//!
//! Outcome screen for one finished adventure. Not-found and unreachable
//! look the same: one generic fallback with a way back.

use dioxus::prelude::*;
use habitquest_core::AdventureResultView;

use crate::api::use_adventure;
use crate::components::{HpBar, TierBadge};
use crate::types::{Adventure, AdventureId};

#[component]
pub fn AdventureResultPage(id: AdventureId, on_back: EventHandler<()>) -> Element {
    let state = use_adventure(id);

    if let Some(adventure) = state.data() {
        return rsx! {
            ResultCard { adventure: adventure.clone(), on_back }
        };
    }

    if state.error().is_some() {
        return rsx! {
            div { class: "page result-page",
                div { class: "result-fallback",
                    span { class: "result-icon", "🗺️" }
                    h2 { "Adventure not found" }
                    p { "We couldn't load this adventure. It may not exist, or the server is unreachable." }
                    button { class: "btn", onclick: move |_| on_back.call(()), "Back to adventures" }
                }
            }
        };
    }

    rsx! {
        div { class: "page result-page",
            div { class: "loading", "Loading adventure..." }
        }
    }
}

#[component]
fn ResultCard(adventure: Adventure, on_back: EventHandler<()>) -> Element {
    let view = AdventureResultView::new(&adventure);
    let display = view.display;
    let subtitle = view.subtitle();
    let xp = view.xp_label();
    let hp = view.hp_label();
    let monster_name = view.monster.name;
    let monster_emoji = view.monster.emoji;
    let monster_tier = view.monster.tier;
    let color = view.monster.color();
    let rows: Vec<(String, u32, Option<u32>)> = view
        .breakdown()
        .map(|rows| {
            rows.map(|row| (row.label(), row.damage_dealt, row.tasks_completed))
                .collect()
        })
        .unwrap_or_default();

    rsx! {
        div { class: "page result-page {display.background}",
            div { class: "result-hero",
                span { class: "result-icon", "{display.icon}" }
                h1 { class: "result-title", "{display.title}" }
                p { class: "result-subtitle", "{subtitle}" }
            }

            div { class: "result-monster",
                span { class: "monster-emoji", "{monster_emoji}" }
                span { class: "monster-name", "{monster_name}" }
                TierBadge { tier: Some(monster_tier) }
            }
            HpBar {
                current: adventure.monster_current_hp,
                max: adventure.monster_max_hp,
                color,
            }

            div { class: "result-stats",
                div { class: "stat",
                    span { class: "stat-label", "Monster HP" }
                    span { class: "stat-value", "{hp}" }
                }
                div { class: "stat",
                    span { class: "stat-label", "Damage dealt" }
                    span { class: "stat-value", "{adventure.total_damage_dealt}" }
                }
                div { class: "stat",
                    span { class: "stat-label", "Rounds" }
                    span { class: "stat-value", "{adventure.current_round}" }
                }
                div { class: "stat stat-xp",
                    span { class: "stat-label", "XP earned" }
                    span { class: "stat-value", "{xp}" }
                    if let Some(caption) = view.penalty {
                        span { class: "stat-caption", "{caption}" }
                    }
                }
            }

            if !rows.is_empty() {
                section { class: "result-breakdown",
                    h3 { "Daily breakdown" }
                    ul {
                        for (label, damage, tasks) in rows {
                            li { key: "{label}", class: "breakdown-row",
                                span { class: "breakdown-day", "{label}" }
                                span { class: "breakdown-damage", "{damage} damage" }
                                if let Some(tasks) = tasks {
                                    span { class: "breakdown-tasks", "{tasks} tasks" }
                                }
                            }
                        }
                    }
                }
            }

            button { class: "btn btn-primary", onclick: move |_| on_back.call(()), "Back to adventures" }
        }
    }
}
