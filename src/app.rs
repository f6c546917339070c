//! Report Dashboard App
//!
//! Root component. The report table itself is rendered by the server; this
//! component wires filtering, comment editing and status polling onto it and
//! renders the notice stack.

use leptos::prelude::*;

use crate::components::NoticeStack;
use crate::context::{DashboardContext, Notice};
use crate::dom;

#[component]
pub fn App() -> impl IntoView {
    let config = dom::read_config();
    let page_data = dom::read_page_data();

    // Provide context to all children
    let ctx = DashboardContext::new(signal(Vec::<Notice>::new()), config);
    provide_context(ctx);

    // Runs once after mount: nothing reactive is read here
    Effect::new(move |_| {
        dom::bind_filters(&page_data);
        dom::bind_comments(ctx);
        dom::bind_status(ctx);
    });

    view! {
        <NoticeStack />
    }
}
