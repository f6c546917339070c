//! Dashboard Context
//!
//! Shared state provided via Leptos Context API.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::config::DashboardConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// User-visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub text: String,
}

/// Dashboard-wide signals provided via context
#[derive(Clone, Copy)]
pub struct DashboardContext {
    /// Notices currently on screen - read
    pub notices: ReadSignal<Vec<Notice>>,
    /// Notices currently on screen - write
    set_notices: WriteSignal<Vec<Notice>>,
    next_notice_id: StoredValue<u32>,
    pub config: StoredValue<DashboardConfig>,
}

impl DashboardContext {
    pub fn new(notices: (ReadSignal<Vec<Notice>>, WriteSignal<Vec<Notice>>), config: DashboardConfig) -> Self {
        Self {
            notices: notices.0,
            set_notices: notices.1,
            next_notice_id: StoredValue::new(0),
            config: StoredValue::new(config),
        }
    }

    /// Show a notice; it disappears on its own after the configured timeout
    pub fn notify(&self, kind: NoticeKind, text: impl Into<String>) {
        let id = self.next_notice_id.get_value();
        self.next_notice_id.set_value(id.wrapping_add(1));
        self.set_notices.update(|list| list.push(Notice { id, kind, text: text.into() }));

        let timeout = self.config.with_value(|c| c.notice_timeout_ms);
        let ctx = *self;
        Timeout::new(timeout, move || ctx.dismiss(id)).forget();
    }

    pub fn info(&self, text: impl Into<String>) {
        self.notify(NoticeKind::Info, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(NoticeKind::Error, text);
    }

    pub fn dismiss(&self, id: u32) {
        self.set_notices.update(|list| list.retain(|n| n.id != id));
    }
}
