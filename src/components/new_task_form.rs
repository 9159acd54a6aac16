//! New Task Form Component
//!
//! Title, target column and optional description for a new task.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::{ColumnId, NewTask};

/// Form for creating new tasks. Fields reset only after the server confirms.
#[component]
pub fn NewTaskForm() -> impl IntoView {
    let ctx = use_app_context();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (active_column, set_active_column) = signal(ColumnId::default());
    let (submitting, set_submitting) = signal(false);

    let add_task = move || {
        if submitting.get_untracked() {
            return;
        }
        let draft = NewTask::new(title.get_untracked(), description.get_untracked());
        if !draft.has_title() {
            return;
        }
        let column = active_column.get_untracked();
        let controller = ctx.controller();

        set_submitting.set(true);
        spawn_local(async move {
            if controller.create_task(column, draft).await.is_applied() {
                set_title.set(String::new());
                set_description.set(String::new());
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="new-task-form">
            <div class="new-task-row">
                <input
                    type="text"
                    placeholder="Task title*"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            add_task();
                        }
                    }
                />
                <select
                    prop:value=move || active_column.get().as_str()
                    on:change=move |ev| {
                        if let Ok(column) = event_target_value(&ev).parse::<ColumnId>() {
                            set_active_column.set(column);
                        }
                    }
                >
                    {ColumnId::ALL
                        .into_iter()
                        .map(|column| {
                            view! {
                                <option
                                    value=column.as_str()
                                    selected=move || active_column.get() == column
                                >
                                    {column.display_name()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
            <textarea
                placeholder="Task description (optional)"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <button
                type="button"
                class="add-task-btn"
                disabled=move || submitting.get()
                on:click=move |_| add_task()
            >
                "Add Task"
            </button>
        </div>
    }
}
