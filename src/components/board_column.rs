//! Board Column Component
//!
//! One fixed column: header with task count, drop target, task list.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_dragleave, make_on_dragover, make_on_drop};

use crate::components::TaskCard;
use crate::context::use_app_context;
use crate::models::ColumnId;
use crate::store::store_column;

#[component]
pub fn BoardColumn(column: ColumnId) -> impl IntoView {
    let ctx = use_app_context();
    let (store, dnd) = ctx.with_controller(|c| (c.store(), c.dnd()));

    let tasks = move || store_column(&store, column).tasks;
    let count = move || store.with(|board| board.column(column).len());
    let has_tasks = move || count() > 0;

    let on_drop = make_on_drop(dnd, column, move |resolution| {
        let controller = ctx.controller();
        spawn_local(async move {
            controller.complete_drop(resolution).await;
        });
    });

    view! {
        <section
            class=move || {
                let mut c = format!("board-column {}", column.accent_class());
                if dnd.is_hovering(&column) {
                    c.push_str(" drop-over");
                }
                c
            }
            on:dragover=make_on_dragover(dnd, column)
            on:dragleave=make_on_dragleave(dnd, column)
            on:drop=on_drop
        >
            <header class="column-header">
                {column.display_name()}
                <span class="column-count">{count}</span>
            </header>

            <div class="column-body">
                <Show
                    when=has_tasks
                    fallback=|| view! { <div class="column-empty">"Drop tasks here"</div> }
                >
                    <For
                        each=tasks
                        key=|task| task.id.clone()
                        children=move |task| view! { <TaskCard column=column task=task /> }
                    />
                </Show>
            </div>
        </section>
    }
}
