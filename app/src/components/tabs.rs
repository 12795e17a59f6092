//! Tab bar used by the navigation, adventure and friends views

use dioxus::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct TabSpec {
    pub label: &'static str,
    pub icon: &'static str,
    /// Optional counter shown after the label (pending requests etc.)
    pub count: Option<usize>,
}

impl TabSpec {
    pub fn new(label: &'static str, icon: &'static str) -> Self {
        Self {
            label,
            icon,
            count: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = (count > 0).then_some(count);
        self
    }
}

#[component]
pub fn TabBar(tabs: Vec<TabSpec>, active: usize, on_select: EventHandler<usize>) -> Element {
    rsx! {
        div { class: "tab-bar", role: "tablist",
            for (index, tab) in tabs.into_iter().enumerate() {
                button {
                    key: "{tab.label}",
                    class: if index == active { "tab-btn active" } else { "tab-btn" },
                    role: "tab",
                    onclick: move |_| on_select.call(index),
                    i { class: tab.icon }
                    " {tab.label}"
                    if let Some(count) = tab.count {
                        span { class: "tab-count", "{count}" }
                    }
                }
            }
        }
    }
}
