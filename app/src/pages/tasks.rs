//! Tasks Page
//!
//! Today's tasks with complete/delete actions and a form to add new ones.

use dioxus::prelude::*;
use habitquest_core::QueryState;

use crate::api::{use_complete_task, use_create_task, use_delete_task, use_tasks};
use crate::components::TaskItem;
use crate::types::NewTask;

const DEFAULT_CATEGORY: &str = "general";

#[component]
pub fn TasksPage() -> Element {
    let tasks = use_tasks();
    let complete = use_complete_task();
    let delete = use_delete_task();
    let busy = complete.is_pending() || delete.is_pending();

    let refreshing = matches!(tasks, QueryState::Success { refreshing: true, .. });
    let body = match tasks {
        QueryState::Idle | QueryState::Loading => rsx! {
            div { class: "loading", "Loading tasks..." }
        },
        QueryState::Error(err) => {
            let message = err.user_message();
            rsx! {
                div { class: "error", "{message}" }
            }
        }
        QueryState::Success { data, .. } if data.is_empty() => rsx! {
            div { class: "empty", "No tasks yet. Add one below to start dealing damage." }
        },
        QueryState::Success { data, .. } => {
            let done = data.iter().filter(|t| t.completed_today).count();
            let total = data.len();
            rsx! {
                div { class: "tasks-progress", "{done} / {total} done today" }
                ul { class: "list",
                    for task in data {
                        TaskItem {
                            key: "{task.id}",
                            busy,
                            on_complete: {
                                let id = task.id;
                                move |_| complete.mutate(id)
                            },
                            on_delete: {
                                let id = task.id;
                                move |_| delete.mutate(id)
                            },
                            task: task.clone(),
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "page tasks-page",
            div { class: "page-header",
                h2 { "Daily Tasks" }
                if refreshing {
                    span { class: "refreshing", i { class: "fa-solid fa-rotate fa-spin" } }
                }
            }
            {body}
            NewTaskForm {}
        }
    }
}

#[component]
fn NewTaskForm() -> Element {
    let create = use_create_task();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut category = use_signal(|| DEFAULT_CATEGORY.to_string());

    let can_submit = !title().trim().is_empty() && !create.is_pending();

    let mut submit = move || {
        let trimmed = title.peek().trim().to_string();
        if trimmed.is_empty() {
            return;
        }
        let desc = description.peek().trim().to_string();
        let cat = category.peek().trim().to_string();
        create.mutate(NewTask {
            title: trimmed,
            description: (!desc.is_empty()).then_some(desc),
            category: if cat.is_empty() { DEFAULT_CATEGORY.to_string() } else { cat },
        });
        title.set(String::new());
        description.set(String::new());
    };

    rsx! {
        form {
            class: "task-form",
            onsubmit: move |evt| {
                evt.prevent_default();
                submit();
            },
            input {
                r#type: "text",
                placeholder: "New task",
                value: "{title}",
                oninput: move |e| title.set(e.value()),
            }
            input {
                r#type: "text",
                placeholder: "Description (optional)",
                value: "{description}",
                oninput: move |e| description.set(e.value()),
            }
            input {
                r#type: "text",
                placeholder: "Category",
                value: "{category}",
                oninput: move |e| category.set(e.value()),
            }
            button { class: "btn btn-primary", r#type: "submit", disabled: !can_submit,
                i { class: "fa-solid fa-plus" }
                " Add task"
            }
            if let Some(err) = create.error() {
                span { class: "error", "{err}" }
            }
        }
    }
}
