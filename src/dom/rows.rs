//! Report Rows

use web_sys::HtmlElement;

use crate::filters::{Row, RowView};

pub const ROW_SELECTOR: &str = "table tbody tr";
pub const HIDDEN_CLASS: &str = "hidden-by-filters";

/// Table row element
pub struct DomRow(HtmlElement);

impl RowView for DomRow {
    fn set_visible(&self, visible: bool) {
        let _ = self.0.class_list().toggle_with_force(HIDDEN_CLASS, !visible);
    }
}

/// Read every rendered row with its filter attributes
pub fn collect_rows() -> Vec<(Row, DomRow)> {
    let Some(root) = super::document().and_then(|d| d.document_element()) else {
        return Vec::new();
    };
    super::query_all(&root, ROW_SELECTOR)
        .into_iter()
        .map(|el| {
            let row = Row::from_attributes(
                el.get_attribute("data-vacancy-name").as_deref(),
                el.get_attribute("data-priority").as_deref(),
                el.get_attribute("data-members").as_deref(),
            );
            (row, DomRow(el))
        })
        .collect()
}
