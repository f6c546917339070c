//! Comment Cell Binding
//!
//! Click-to-edit for `.comment-cell` elements. Clicks are delegated from the
//! table body; each open field carries its own blur/keydown listeners which
//! are removed together with the field.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlTextAreaElement, KeyboardEvent, MouseEvent};

use crate::api;
use crate::context::DashboardContext;
use crate::editor::{CommentCellView, CommentEditor, KeyAction, PendingSave};

pub const TABLE_BODY_SELECTOR: &str = "table tbody";
pub const CELL_SELECTOR: &str = ".comment-cell";
pub const DISPLAY_SELECTOR: &str = ".editable-comment";
pub const FIELD_CLASS: &str = "editing-comment";

type SharedEditor = Rc<RefCell<CommentEditor<DomCommentCell>>>;

struct OpenField {
    textarea: HtmlTextAreaElement,
    on_blur: Closure<dyn FnMut(Event)>,
    on_keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

/// Comment cell backed by the page markup
pub struct DomCommentCell {
    cell: HtmlElement,
    display: HtmlElement,
    field: Option<OpenField>,
    editor: Weak<RefCell<CommentEditor<DomCommentCell>>>,
    ctx: DashboardContext,
}

impl CommentCellView for DomCommentCell {
    fn display_text(&self) -> String {
        self.display.text_content().unwrap_or_default()
    }

    fn set_display_text(&mut self, text: &str) {
        self.display.set_text_content(Some(text));
    }

    fn open_field(&mut self, initial: &str) -> bool {
        let Some(textarea) = super::document()
            .and_then(|d| d.create_element("textarea").ok())
            .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
        else {
            log::error!("[COMMENT] Could not create an editing field");
            return false;
        };
        textarea.set_class_name(FIELD_CLASS);
        textarea.set_value(initial);

        let editor = self.editor.clone();
        let ctx = self.ctx;
        let on_blur = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            finish(&editor, ctx, false);
        });

        let editor = self.editor.clone();
        let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
            match KeyAction::from_key(&ev.key(), ev.shift_key()) {
                KeyAction::Commit => {
                    ev.prevent_default();
                    finish(&editor, ctx, false);
                }
                KeyAction::Cancel => {
                    ev.prevent_default();
                    finish(&editor, ctx, true);
                }
                KeyAction::Ignore => {}
            }
        });

        let _ = textarea.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref());
        let _ = textarea.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());

        let _ = self.display.style().set_property("display", "none");
        let _ = self.cell.append_child(&textarea);
        let _ = textarea.focus();
        textarea.select();

        self.field = Some(OpenField { textarea, on_blur, on_keydown });
        true
    }

    fn field_value(&self) -> String {
        self.field.as_ref().map(|f| f.textarea.value()).unwrap_or_default()
    }

    fn set_field_value(&mut self, value: &str) {
        if let Some(field) = &self.field {
            field.textarea.set_value(value);
        }
    }

    fn close_field(&mut self) {
        if let Some(field) = self.field.take() {
            // Listeners go first so detaching a focused field cannot re-enter the editor
            let _ = field
                .textarea
                .remove_event_listener_with_callback("blur", field.on_blur.as_ref().unchecked_ref());
            let _ = field
                .textarea
                .remove_event_listener_with_callback("keydown", field.on_keydown.as_ref().unchecked_ref());
            field.textarea.remove();
        }
        let _ = self.display.style().remove_property("display");
    }
}

/// Close the open field and persist the change, if any
fn finish(editor: &Weak<RefCell<CommentEditor<DomCommentCell>>>, ctx: DashboardContext, cancel: bool) {
    let Some(editor) = editor.upgrade() else {
        return;
    };
    // Bind first so the borrow ends before any request is spawned
    let pending = {
        let mut editor = editor.borrow_mut();
        if cancel {
            editor.cancel()
        } else {
            editor.commit()
        }
    };
    if let Some(save) = pending {
        persist(save, ctx);
    }
}

fn persist(save: PendingSave<DomCommentCell>, ctx: DashboardContext) {
    let url = ctx.config.with_value(|c| c.comment_url.clone());
    spawn_local(async move {
        match api::update_comment(&url, &save.vacancy_name, &save.comment).await {
            Ok(()) => log::debug!("[COMMENT] Saved comment for {:?}", save.vacancy_name),
            Err(e) => {
                log::error!(
                    "[COMMENT] Save failed for {:?}, reverting to {:?}: {}",
                    save.vacancy_name,
                    save.original(),
                    e
                );
                ctx.error(format!("Ошибка при сохранении: {}", e));
                save.rollback();
            }
        }
    });
}

/// Cell clicked, if it is a comment cell in display mode
fn displaying_cell(target: &Element) -> Option<(HtmlElement, HtmlElement, String)> {
    let cell = target.closest(CELL_SELECTOR).ok()??.dyn_into::<HtmlElement>().ok()?;
    if cell.query_selector("textarea").ok().flatten().is_some() {
        return None;
    }
    let display = cell.query_selector(DISPLAY_SELECTOR).ok()??.dyn_into::<HtmlElement>().ok()?;
    let vacancy_name = cell.get_attribute("data-vacancy-name").unwrap_or_default();
    Some((cell, display, vacancy_name))
}

/// Enable click-to-edit on every comment cell of the report table
pub fn bind_comments(ctx: DashboardContext) {
    let Some(body) = super::document().and_then(|d| d.query_selector(TABLE_BODY_SELECTOR).ok().flatten()) else {
        log::warn!("[COMMENT] No table body; comment editing disabled");
        return;
    };

    let editor: SharedEditor = Rc::new(RefCell::new(CommentEditor::new()));
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        if editor.borrow().is_editing() {
            return;
        }
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Some((cell, display, vacancy_name)) = displaying_cell(&target) else {
            return;
        };
        let view = DomCommentCell {
            cell,
            display,
            field: None,
            editor: Rc::downgrade(&editor),
            ctx,
        };
        if let Err(e) = editor.borrow_mut().begin(&vacancy_name, view) {
            log::debug!("[COMMENT] Ignoring click: {:?}", e);
        }
    });

    let _ = body.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();
}
