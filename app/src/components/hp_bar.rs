use dioxus::prelude::*;
use habitquest_core::adventure::hp_bar_style;

/// Monster health bar. Fill follows `hp_percent`, so a server that reports
/// more HP than the maximum overflows the track instead of being hidden.
#[component]
pub fn HpBar(current: u32, max: u32, color: &'static str) -> Element {
    let style = hp_bar_style(current, max, color);

    rsx! {
        div { class: "hp-bar",
            div {
                class: "hp-bar-fill",
                style: "{style}",
            }
            span { class: "hp-bar-label", "{current} / {max} HP" }
        }
    }
}
