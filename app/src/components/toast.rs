//! Toast notifications for mutation results.
//!
//! A single toast manager lives in context; mutation hooks report successes
//! and failures through it and each toast dismisses itself after a delay.

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

const MAX_TOASTS: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Mutation went through - 3 seconds
    Success,
    /// Request failed - 6 seconds
    Error,
}

impl ToastKind {
    fn duration_ms(&self) -> u32 {
        match self {
            ToastKind::Success => 3000,
            ToastKind::Error => 6000,
        }
    }

    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "fa-solid fa-circle-check",
            ToastKind::Error => "fa-solid fa-triangle-exclamation",
        }
    }
}

#[derive(Clone)]
pub struct Toast {
    pub id: u32,
    pub message: String,
    pub kind: ToastKind,
}

/// Access via `use_toast()` from any component.
#[derive(Clone, Copy)]
pub struct ToastManager {
    toasts: Signal<Vec<Toast>>,
    next_id: Signal<u32>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: Signal::new(vec![]),
            next_id: Signal::new(0),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, ToastKind::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, ToastKind::Error);
    }

    /// Oldest toast is dropped once more than `MAX_TOASTS` are showing
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) {
        let id = *self.next_id.peek();
        *self.next_id.write() += 1;

        {
            let mut toasts = self.toasts.write();
            if toasts.len() >= MAX_TOASTS {
                toasts.remove(0);
            }
            toasts.push(Toast {
                id,
                message: message.into(),
                kind,
            });
        }

        let mut toasts = self.toasts;
        spawn(async move {
            TimeoutFuture::new(kind.duration_ms()).await;
            toasts.write().retain(|t| t.id != id);
        });
    }

    pub fn dismiss(&mut self, id: u32) {
        self.toasts.write().retain(|t| t.id != id);
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Call once in the root component, before any child uses toasts.
pub fn use_toast_provider() -> ToastManager {
    use_context_provider(ToastManager::new)
}

pub fn use_toast() -> ToastManager {
    use_context::<ToastManager>()
}

/// Renders all active toasts. Place once at the end of the layout.
#[component]
pub fn ToastFrame() -> Element {
    let mut manager = use_toast();
    let toasts = manager.toasts.read();

    rsx! {
        div { class: "toast-container",
            for toast in toasts.iter() {
                div { key: "{toast.id}", class: toast.kind.class(),
                    span { class: "toast-icon",
                        i { class: toast.kind.icon() }
                    }
                    span { class: "toast-message", "{toast.message}" }
                    button {
                        class: "toast-close",
                        onclick: {
                            let id = toast.id;
                            move |_| manager.dismiss(id)
                        },
                        "X"
                    }
                }
            }
        }
    }
}
