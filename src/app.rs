//! Task Board App
//!
//! Page layout: creation form above the three fixed columns.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::error;

use crate::components::{BoardColumn, NewTaskForm, NoticeBanner};
use crate::config::GatewayConfig;
use crate::context::AppContext;
use crate::controller::BoardController;
use crate::gateway::HttpTaskGateway;
use crate::models::ColumnId;

#[component]
pub fn App(gateway: GatewayConfig) -> impl IntoView {
    let gateway = match HttpTaskGateway::new(gateway) {
        Ok(gateway) => gateway,
        Err(err) => {
            error!(error = %err, "could not build HTTP client");
            return view! {
                <div class="board-page">
                    <p class="notice">"The task board could not start: " {err.to_string()}</p>
                </div>
            }
            .into_any();
        }
    };

    let ctx = AppContext::new(BoardController::new(gateway));
    provide_context(ctx);

    // Initial load on mount
    Effect::new(move |_| {
        let controller = ctx.controller();
        spawn_local(async move {
            controller.load().await;
        });
    });

    view! {
        <div class="board-page">
            <h1>"Task Manager"</h1>

            <NoticeBanner />

            <NewTaskForm />

            <div class="board-columns">
                {ColumnId::ALL
                    .into_iter()
                    .map(|column| view! { <BoardColumn column=column /> })
                    .collect_view()}
            </div>
        </div>
    }
    .into_any()
}
