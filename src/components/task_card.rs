//! Task Card Component
//!
//! Draggable card showing one task with a delete button.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_dragend, make_on_dragstart};
use web_sys::MouseEvent;

use crate::context::use_app_context;
use crate::models::{ColumnId, Task};

#[component]
pub fn TaskCard(column: ColumnId, task: Task) -> impl IntoView {
    let ctx = use_app_context();
    let dnd = ctx.with_controller(|c| c.dnd());

    let on_dragstart = make_on_dragstart(dnd, column, task.clone(), task.title.clone());
    let on_dragend = make_on_dragend(dnd);

    let busy_id = task.id.clone();
    let is_busy = move || ctx.with_controller(|c| c.is_busy(&busy_id));

    let task_id = task.id.clone();
    let on_delete = move |ev: MouseEvent| {
        ev.stop_propagation();
        let controller = ctx.controller();
        let task_id = task_id.clone();
        spawn_local(async move {
            controller.delete_task(column, task_id).await;
        });
    };

    let description = task.visible_description().map(str::to_string);

    view! {
        <div
            class=move || if is_busy() { "task-card busy" } else { "task-card" }
            draggable="true"
            on:dragstart=on_dragstart
            on:dragend=on_dragend
        >
            <div class="task-card-body">
                <div class="task-title">{task.title}</div>
                {description.map(|text| view! { <div class="task-description">{text}</div> })}
            </div>
            <button class="delete-btn" title="Delete task" on:click=on_delete>
                "×"
            </button>
        </div>
    }
}
