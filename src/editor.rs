//! Inline Comment Editing
//!
//! A comment cell is either displaying its text or hosting an editable
//! field. The editor owns the single active session, so at most one cell
//! is in the editing state at any time.

/// Rendered comment cell
pub trait CommentCellView {
    /// Text currently shown in the display element
    fn display_text(&self) -> String;
    fn set_display_text(&mut self, text: &str);
    /// Hide the display element and show a focused, fully selected field.
    /// Returns `false` when no field could be created.
    fn open_field(&mut self, initial: &str) -> bool;
    fn field_value(&self) -> String;
    fn set_field_value(&mut self, value: &str);
    /// Detach the field and release its listeners, showing the display element again
    fn close_field(&mut self);
}

/// Keys with a meaning while a field is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Commit,
    Cancel,
    Ignore,
}

impl KeyAction {
    /// Enter without shift commits, Escape cancels; everything else is regular typing
    pub fn from_key(key: &str, shift: bool) -> Self {
        match key {
            "Enter" if !shift => KeyAction::Commit,
            "Escape" => KeyAction::Cancel,
            _ => KeyAction::Ignore,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeginError {
    /// A field is already open (possibly in this very cell)
    AlreadyEditing(String),
    /// The cell could not host an editing field
    FieldUnavailable,
}

struct EditSession<V> {
    vacancy_name: String,
    original: String,
    cell: V,
}

/// Save that must be sent to the backend after an optimistic display update
#[derive(Debug)]
pub struct PendingSave<V> {
    pub vacancy_name: String,
    pub comment: String,
    original: String,
    cell: V,
}

impl<V: CommentCellView> PendingSave<V> {
    /// Restore the pre-edit text after a failed persist
    pub fn rollback(mut self) {
        self.cell.set_display_text(&self.original);
    }

    pub fn original(&self) -> &str {
        &self.original
    }
}

pub struct CommentEditor<V> {
    active: Option<EditSession<V>>,
}

impl<V> Default for CommentEditor<V> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<V: CommentCellView> CommentEditor<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    /// Switch a displaying cell into editing mode
    pub fn begin(&mut self, vacancy_name: &str, mut cell: V) -> Result<(), BeginError> {
        if let Some(session) = &self.active {
            return Err(BeginError::AlreadyEditing(session.vacancy_name.clone()));
        }
        let original = cell.display_text().trim().to_string();
        if !cell.open_field(&original) {
            return Err(BeginError::FieldUnavailable);
        }
        self.active = Some(EditSession {
            vacancy_name: vacancy_name.to_string(),
            original,
            cell,
        });
        Ok(())
    }

    /// Put the pre-edit text back into the open field
    pub fn revert_field(&mut self) {
        if let Some(session) = &mut self.active {
            let original = session.original.clone();
            session.cell.set_field_value(&original);
        }
    }

    /// Close the open field. Returns the save to issue when the trimmed value changed.
    ///
    /// Calling this with no open field is a no-op, which absorbs the extra blur
    /// some browsers fire while the field is being detached.
    pub fn commit(&mut self) -> Option<PendingSave<V>> {
        let EditSession { vacancy_name, original, mut cell } = self.active.take()?;
        let value = cell.field_value().trim().to_string();
        cell.close_field();

        if value == original {
            cell.set_display_text(&original);
            return None;
        }

        cell.set_display_text(&value);
        Some(PendingSave {
            vacancy_name,
            comment: value,
            original,
            cell,
        })
    }

    /// Discard typed content and close the field without saving
    pub fn cancel(&mut self) -> Option<PendingSave<V>> {
        self.revert_field();
        self.commit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct CellState {
        display: String,
        field: Option<String>,
        opened: usize,
        closed: usize,
    }

    #[derive(Debug, Clone, Default)]
    struct FakeCell(Rc<RefCell<CellState>>);

    impl FakeCell {
        fn showing(text: &str) -> Self {
            let cell = Self::default();
            cell.0.borrow_mut().display = text.to_string();
            cell
        }

        fn type_text(&self, text: &str) {
            self.0.borrow_mut().field = Some(text.to_string());
        }

        fn display(&self) -> String {
            self.0.borrow().display.clone()
        }
    }

    impl CommentCellView for FakeCell {
        fn display_text(&self) -> String {
            self.0.borrow().display.clone()
        }
        fn set_display_text(&mut self, text: &str) {
            self.0.borrow_mut().display = text.to_string();
        }
        fn open_field(&mut self, initial: &str) -> bool {
            let mut state = self.0.borrow_mut();
            state.field = Some(initial.to_string());
            state.opened += 1;
            true
        }
        fn field_value(&self) -> String {
            self.0.borrow().field.clone().unwrap_or_default()
        }
        fn set_field_value(&mut self, value: &str) {
            self.0.borrow_mut().field = Some(value.to_string());
        }
        fn close_field(&mut self) {
            let mut state = self.0.borrow_mut();
            state.field = None;
            state.closed += 1;
        }
    }

    #[test]
    fn test_key_actions() {
        assert_eq!(KeyAction::from_key("Enter", false), KeyAction::Commit);
        assert_eq!(KeyAction::from_key("Enter", true), KeyAction::Ignore);
        assert_eq!(KeyAction::from_key("Escape", false), KeyAction::Cancel);
        assert_eq!(KeyAction::from_key("Escape", true), KeyAction::Cancel);
        assert_eq!(KeyAction::from_key("a", false), KeyAction::Ignore);
    }

    #[test]
    fn test_begin_prefills_trimmed_text() {
        let cell = FakeCell::showing("  waiting for offer \n");
        let mut editor = CommentEditor::new();

        editor.begin("QA", cell.clone()).unwrap();

        assert!(editor.is_editing());
        assert_eq!(cell.field_value(), "waiting for offer");
    }

    #[test]
    fn test_unchanged_commit_issues_no_save() {
        let cell = FakeCell::showing("on hold");
        let mut editor = CommentEditor::new();
        editor.begin("QA", cell.clone()).unwrap();
        cell.type_text("   on hold  ");

        assert!(editor.commit().is_none());
        assert!(!editor.is_editing());
        assert_eq!(cell.display(), "on hold");
        assert_eq!(cell.0.borrow().field, None);
    }

    #[test]
    fn test_changed_commit_is_optimistic_and_rolls_back() {
        let cell = FakeCell::showing("on hold");
        let mut editor = CommentEditor::new();
        editor.begin("Backend Engineer", cell.clone()).unwrap();
        cell.type_text(" offer sent ");

        let save = editor.commit().expect("changed value must be saved");
        assert_eq!(save.vacancy_name, "Backend Engineer");
        assert_eq!(save.comment, "offer sent");
        assert_eq!(save.original(), "on hold");
        assert_eq!(cell.display(), "offer sent");
        assert_eq!(cell.0.borrow().field, None);

        save.rollback();
        assert_eq!(cell.display(), "on hold");
    }

    #[test]
    fn test_escape_restores_pre_edit_text() {
        for typed in ["", "something else", "on hold  "] {
            let cell = FakeCell::showing("on hold");
            let mut editor = CommentEditor::new();
            editor.begin("QA", cell.clone()).unwrap();
            cell.type_text(typed);

            assert!(editor.cancel().is_none());
            assert_eq!(cell.display(), "on hold");
            assert!(!editor.is_editing());
        }
    }

    #[test]
    fn test_single_session_at_a_time() {
        let first = FakeCell::showing("a");
        let second = FakeCell::showing("b");
        let mut editor = CommentEditor::new();

        editor.begin("A", first.clone()).unwrap();
        assert_eq!(
            editor.begin("B", second.clone()),
            Err(BeginError::AlreadyEditing("A".to_string()))
        );
        assert_eq!(second.0.borrow().opened, 0);

        editor.commit();
        editor.begin("B", second.clone()).unwrap();
        assert_eq!(second.0.borrow().opened, 1);
        assert_eq!(
            editor.begin("A", first.clone()),
            Err(BeginError::AlreadyEditing("B".to_string()))
        );
    }

    #[test]
    fn test_repeated_commit_is_noop() {
        let cell = FakeCell::showing("x");
        let mut editor = CommentEditor::new();
        editor.begin("A", cell.clone()).unwrap();
        cell.type_text("y");

        assert!(editor.commit().is_some());
        assert!(editor.commit().is_none());
        assert_eq!(cell.0.borrow().closed, 1);
    }

    #[test]
    fn test_repeated_edit_cycles_close_every_field() {
        let cell = FakeCell::showing("x");
        let mut editor = CommentEditor::new();
        for _ in 0..3 {
            editor.begin("A", cell.clone()).unwrap();
            editor.commit();
        }
        let state = cell.0.borrow();
        assert_eq!(state.opened, 3);
        assert_eq!(state.closed, 3);
        assert_eq!(state.field, None);
    }
}
