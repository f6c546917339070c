//! Notice Stack Component
//!
//! Floating list of notices raised by the dashboard (refresh results, save errors).

use leptos::prelude::*;

use crate::context::{DashboardContext, NoticeKind};

/// Floating notice list, newest at the bottom
#[component]
pub fn NoticeStack() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext should be provided");

    view! {
        <div class="notice-stack" role="status">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    let class = match notice.kind {
                        NoticeKind::Info => "notice notice-info",
                        NoticeKind::Error => "notice notice-error",
                    };
                    view! {
                        <div class=class>
                            <span class="notice-text">{notice.text}</span>
                            <button
                                class="notice-close"
                                title="Закрыть"
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    ctx.dismiss(id);
                                }
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
