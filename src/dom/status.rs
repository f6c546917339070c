//! Status Overlay & Refresh Button
//!
//! Polls the job status on an interval and reflects it in the page chrome.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, MouseEvent};

use crate::api;
use crate::config::DashboardConfig;
use crate::context::DashboardContext;
use crate::models::JobStatus;
use crate::poller::{start_polling, PageNavigator, Scheduler, StatusPoller, StatusView};

pub const OVERLAY_ID: &str = "update-overlay";
pub const REFRESH_BUTTON_ID: &str = "refreshButton";
pub const LAST_UPDATED_ID: &str = "last-updated-time";
pub const OVERLAY_HIDDEN_CLASS: &str = "hidden";

/// Page chrome touched by status changes; each part is optional
struct DomStatusView {
    overlay: Option<Element>,
    button: Option<HtmlButtonElement>,
    last_updated: Option<Element>,
    config: DashboardConfig,
}

impl DomStatusView {
    fn find(config: DashboardConfig) -> Self {
        Self {
            overlay: super::by_id(OVERLAY_ID),
            button: super::by_id(REFRESH_BUTTON_ID),
            last_updated: super::by_id(LAST_UPDATED_ID),
            config,
        }
    }
}

impl StatusView for DomStatusView {
    fn render(&mut self, status: &JobStatus) {
        if let Some(overlay) = &self.overlay {
            let _ = overlay
                .class_list()
                .toggle_with_force(OVERLAY_HIDDEN_CLASS, !status.is_updating);
        }
        if let Some(button) = &self.button {
            button.set_disabled(status.is_updating);
            button.set_text_content(Some(self.config.refresh_label(status.is_updating)));
        }
        if let (Some(label), Some(when)) = (&self.last_updated, status.label()) {
            label.set_text_content(Some(&self.config.last_updated_label(when)));
        }
    }

    fn set_refresh_busy(&mut self, busy: bool) {
        if let Some(button) = &self.button {
            button.set_disabled(busy);
            button.set_text_content(Some(self.config.refresh_label(busy)));
        }
    }
}

struct WindowNavigator;

impl PageNavigator for WindowNavigator {
    fn reload(&self) {
        log::info!("[POLL] Report refreshed, reloading page");
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                log::error!("[POLL] Reload failed: {:?}", e);
            }
        }
    }
}

/// `setInterval`-backed scheduler; tasks run for the lifetime of the page
struct IntervalScheduler;

impl Scheduler for IntervalScheduler {
    fn every(&self, period: Duration, mut task: Box<dyn FnMut()>) {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(millis, move || task()).forget();
    }
}

struct StatusBinding {
    poller: RefCell<StatusPoller>,
    view: RefCell<DomStatusView>,
}

impl StatusBinding {
    fn apply(&self, result: Result<JobStatus, api::ApiError>) {
        self.poller
            .borrow_mut()
            .handle(result, &mut *self.view.borrow_mut(), &WindowNavigator);
    }

    fn request_refresh(&self) -> bool {
        self.poller.borrow_mut().refresh_requested(&mut *self.view.borrow_mut())
    }

    fn finish_refresh(&self, accepted: bool) {
        self.poller
            .borrow_mut()
            .refresh_finished(accepted, &mut *self.view.borrow_mut());
    }
}

fn bind_refresh_button(binding: Rc<StatusBinding>, ctx: DashboardContext) {
    let Some(button) = super::by_id::<HtmlButtonElement>(REFRESH_BUTTON_ID) else {
        return;
    };
    let url = ctx.config.with_value(|c| c.refresh_url.clone());
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| {
        if !binding.request_refresh() {
            log::debug!("[REFRESH] Request already in flight");
            return;
        }
        let binding = binding.clone();
        let url = url.clone();
        spawn_local(async move {
            let result = api::start_refresh(&url).await;
            binding.finish_refresh(result.is_ok());
            match result {
                Ok(resp) => {
                    if !resp.message.is_empty() {
                        ctx.info(resp.message);
                    }
                }
                Err(e) => {
                    log::error!("[REFRESH] Refresh request failed: {}", e);
                    ctx.error(format!("Ошибка при обновлении: {}", e));
                }
            }
        });
    });
    let _ = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();
}

/// Start status polling and enable the manual refresh button
pub fn bind_status(ctx: DashboardContext) {
    let config = ctx.config.get_value();
    let period = Duration::from_millis(u64::from(config.poll_interval_ms));
    let status_url = config.status_url.clone();
    let binding = Rc::new(StatusBinding {
        poller: RefCell::new(StatusPoller::new()),
        view: RefCell::new(DomStatusView::find(config)),
    });

    bind_refresh_button(binding.clone(), ctx);

    start_polling(&IntervalScheduler, period, move || {
        let binding = binding.clone();
        let url = status_url.clone();
        spawn_local(async move {
            let result = api::fetch_status(&url).await;
            binding.apply(result);
        });
    });
    log::info!("[POLL] Polling status every {:?}", period);
}
