//! UI Components
//!
//! Leptos components rendered next to the server-rendered report.

mod notice_stack;

pub use notice_stack::NoticeStack;
