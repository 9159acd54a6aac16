//! Notice Banner Component

use leptos::prelude::*;

use crate::context::use_app_context;

/// Shows the last failure until the user dismisses it
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = use_app_context();
    let notice = ctx.with_controller(|c| c.notice());

    move || {
        notice.get().map(|notice| {
            view! {
                <div class="notice" role="alert">
                    <span class="notice-message">{notice.message}</span>
                    <button
                        class="notice-dismiss"
                        on:click=move |_| ctx.with_controller(|c| c.dismiss_notice())
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}
