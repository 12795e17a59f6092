//! Badges
//!
//! Small inline labels for tiers, adventure status, level and streaks.

use dioxus::prelude::*;
use habitquest_core::tier_color;

use crate::types::{AdventureStatus, MonsterTier};
use crate::utils::format_number;

/// Tier label tinted with the tier color. A missing tier shows as easy.
#[component]
pub fn TierBadge(tier: Option<MonsterTier>) -> Element {
    let color = tier_color(tier);
    let label = tier.unwrap_or_default().label();

    rsx! {
        span {
            class: "badge badge-tier",
            style: "color: {color}; border-color: {color};",
            "{label}"
        }
    }
}

#[component]
pub fn StatusBadge(status: AdventureStatus) -> Element {
    let class = match status {
        AdventureStatus::Active => "badge badge-status status-active",
        AdventureStatus::Completed => "badge badge-status status-completed",
        AdventureStatus::Escaped | AdventureStatus::Unknown => "badge badge-status status-escaped",
        AdventureStatus::Abandoned => "badge badge-status status-abandoned",
    };

    let label = status.label();
    rsx! {
        span { class: class, "{label}" }
    }
}

#[component]
pub fn LevelBadge(level: u32, xp: u64) -> Element {
    let xp_text = format_number(xp);
    rsx! {
        span { class: "badge badge-level",
            i { class: "fa-solid fa-star" }
            " Lv {level}"
            span { class: "badge-sub", " · {xp_text} XP" }
        }
    }
}

/// Hidden when the streak is zero
#[component]
pub fn StreakBadge(days: u32) -> Element {
    if days == 0 {
        return rsx! {};
    }
    rsx! {
        span { class: "badge badge-streak", title: "Current streak",
            i { class: "fa-solid fa-fire" }
            " {days}"
        }
    }
}
