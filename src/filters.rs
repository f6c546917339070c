//! Row Filtering
//!
//! Visibility of report rows as a pure function of the priority toggle and
//! the two multi-select pickers. An empty picker selection imposes no
//! restriction.

use std::collections::BTreeSet;

/// One vacancy row as rendered by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub vacancy_name: String,
    pub is_priority: bool,
    pub member_ids: BTreeSet<u32>,
}

impl Row {
    /// Build a row from its `data-*` attributes.
    /// A missing or malformed member list yields an empty set; entries that
    /// are not recruiter ids are skipped individually.
    pub fn from_attributes(vacancy_name: Option<&str>, priority: Option<&str>, members: Option<&str>) -> Self {
        let member_ids = match members {
            Some(raw) if !raw.trim().is_empty() => match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
                Ok(entries) => entries.iter().filter_map(member_id).collect(),
                Err(e) => {
                    log::warn!("[FILTER] Ignoring malformed member list {:?}: {}", raw, e);
                    BTreeSet::new()
                }
            },
            _ => BTreeSet::new(),
        };
        Self {
            vacancy_name: vacancy_name.unwrap_or_default().to_string(),
            is_priority: priority == Some("true"),
            member_ids,
        }
    }
}

/// Recruiter id from one `data-members` entry
fn member_id(entry: &serde_json::Value) -> Option<u32> {
    let id = entry.as_u64().and_then(|id| u32::try_from(id).ok());
    if id.is_none() {
        log::warn!("[FILTER] Skipping member entry {}", entry);
    }
    id
}

/// Current filter widget state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub priority_only: bool,
    pub recruiter_ids: BTreeSet<u32>,
    pub vacancy_names: BTreeSet<String>,
}

impl FilterCriteria {
    /// Build criteria from raw picker values; recruiter values that are not integers are dropped
    pub fn from_selection(priority_only: bool, recruiters: &[String], vacancies: &[String]) -> Self {
        Self {
            priority_only,
            recruiter_ids: recruiters.iter().filter_map(|id| id.trim().parse().ok()).collect(),
            vacancy_names: vacancies.iter().cloned().collect(),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        let priority_match = !self.priority_only || row.is_priority;
        let recruiter_match = self.recruiter_ids.is_empty()
            || !self.recruiter_ids.is_disjoint(&row.member_ids);
        let vacancy_match = self.vacancy_names.is_empty()
            || self.vacancy_names.contains(&row.vacancy_name);
        priority_match && recruiter_match && vacancy_match
    }
}

// ========================
// Widget Capabilities
// ========================

/// Multi-select widget
pub trait Picker {
    /// Currently selected option values
    fn selected(&self) -> Vec<String>;
    /// Register a handler invoked after every selection change
    fn on_change(&self, handler: Box<dyn Fn()>);
}

/// Boolean widget (the priority checkbox)
pub trait Toggle {
    fn is_checked(&self) -> bool;
    fn on_change(&self, handler: Box<dyn Fn()>);
}

/// Rendered row whose visibility can be switched
pub trait RowView {
    fn set_visible(&self, visible: bool);
}

/// Applies filter criteria to a fixed list of rows.
///
/// Rows are never reordered, added or removed; only their visibility changes.
pub struct FilterEvaluator<R: RowView> {
    rows: Vec<(Row, R)>,
    priority: Option<Box<dyn Toggle>>,
    recruiters: Option<Box<dyn Picker>>,
    vacancies: Option<Box<dyn Picker>>,
}

impl<R: RowView> FilterEvaluator<R> {
    pub fn new(
        rows: Vec<(Row, R)>,
        priority: Option<Box<dyn Toggle>>,
        recruiters: Option<Box<dyn Picker>>,
        vacancies: Option<Box<dyn Picker>>,
    ) -> Self {
        Self { rows, priority, recruiters, vacancies }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Read the widgets. Absent widgets impose no restriction.
    pub fn criteria(&self) -> FilterCriteria {
        let priority_only = self.priority.as_ref().map_or(false, |t| t.is_checked());
        let recruiters = self.recruiters.as_ref().map(|p| p.selected()).unwrap_or_default();
        let vacancies = self.vacancies.as_ref().map(|p| p.selected()).unwrap_or_default();
        FilterCriteria::from_selection(priority_only, &recruiters, &vacancies)
    }

    /// Recompute visibility of every row; returns the number of visible rows
    pub fn apply(&self) -> usize {
        let criteria = self.criteria();
        let mut visible = 0;
        for (row, view) in &self.rows {
            let shown = criteria.matches(row);
            view.set_visible(shown);
            visible += usize::from(shown);
        }
        visible
    }
}

impl<R: RowView + 'static> FilterEvaluator<R> {
    /// Subscribe to every widget and run one initial pass
    pub fn bind(evaluator: std::rc::Rc<Self>) {
        let rerun = {
            let evaluator = evaluator.clone();
            move || {
                let visible = evaluator.apply();
                log::debug!("[FILTER] {} of {} rows visible", visible, evaluator.row_count());
            }
        };
        if let Some(toggle) = &evaluator.priority {
            toggle.on_change(Box::new(rerun.clone()));
        }
        if let Some(picker) = &evaluator.recruiters {
            picker.on_change(Box::new(rerun.clone()));
        }
        if let Some(picker) = &evaluator.vacancies {
            picker.on_change(Box::new(rerun.clone()));
        }
        rerun();
    }
}
