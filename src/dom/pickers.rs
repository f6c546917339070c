//! Filter Widgets
//!
//! Priority checkbox plus the recruiter/vacancy multi-selects. The selects are
//! upgraded to TomSelect pickers when that library is loaded on the page and
//! read as plain `<select multiple>` otherwise.

use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlOptionElement, HtmlSelectElement};

use crate::filters::{FilterEvaluator, Picker, Toggle};
use crate::models::PageData;

pub const PRIORITY_TOGGLE_ID: &str = "priority-toggle";
pub const RECRUITER_FILTER_ID: &str = "recruiter-filter";
pub const VACANCY_FILTER_ID: &str = "vacancy-filter";

#[wasm_bindgen]
extern "C" {
    /// Global `TomSelect` class from the tom-select script
    #[derive(Debug, Clone)]
    type TomSelect;

    #[wasm_bindgen(constructor, catch)]
    fn new(element: &Element, settings: &JsValue) -> Result<TomSelect, JsValue>;

    #[wasm_bindgen(method, js_name = getValue)]
    fn get_value(this: &TomSelect) -> JsValue;

    #[wasm_bindgen(method)]
    fn on(this: &TomSelect, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = setTextboxValue)]
    fn set_textbox_value(this: &TomSelect, value: &str);

    #[wasm_bindgen(method)]
    fn blur(this: &TomSelect);
}

// ========================
// Picker Options
// ========================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerOption {
    pub value: String,
    pub text: String,
}

#[derive(Serialize)]
struct TomSelectSettings<'a> {
    #[serde(skip_serializing_if = "no_options")]
    options: &'a [PickerOption],
    plugins: [&'static str; 1],
}

fn no_options(options: &&[PickerOption]) -> bool {
    options.is_empty()
}

/// Recruiter options: id as value, display name as text
pub fn recruiter_options(data: &PageData) -> Vec<PickerOption> {
    data.coworkers
        .iter()
        .map(|(id, name)| PickerOption { value: id.clone(), text: name.clone() })
        .collect()
}

/// Vacancy options: the name is both value and text, duplicates dropped
pub fn vacancy_options(data: &PageData) -> Vec<PickerOption> {
    let mut seen = std::collections::BTreeSet::new();
    data.vacancies
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .map(|name| PickerOption { value: name.clone(), text: name.clone() })
        .collect()
}

// ========================
// Widgets
// ========================

/// `<input type="checkbox">`
struct CheckboxToggle(HtmlInputElement);

impl Toggle for CheckboxToggle {
    fn is_checked(&self) -> bool {
        self.0.checked()
    }

    fn on_change(&self, handler: Box<dyn Fn()>) {
        let cb = Closure::<dyn Fn()>::new(move || handler());
        let _ = self.0.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
        cb.forget();
    }
}

struct TomSelectPicker(TomSelect);

impl Picker for TomSelectPicker {
    fn selected(&self) -> Vec<String> {
        let value = self.0.get_value();
        if let Some(single) = value.as_string() {
            return if single.is_empty() { Vec::new() } else { vec![single] };
        }
        serde_wasm_bindgen::from_value(value).unwrap_or_default()
    }

    fn on_change(&self, handler: Box<dyn Fn()>) {
        let cb = Closure::<dyn Fn()>::new(move || handler());
        self.0.on("change", cb.as_ref().unchecked_ref());
        cb.forget();
    }
}

/// Plain `<select multiple>`
struct NativeSelectPicker(HtmlSelectElement);

impl Picker for NativeSelectPicker {
    fn selected(&self) -> Vec<String> {
        let options = self.0.selected_options();
        (0..options.length())
            .filter_map(|i| options.item(i))
            .filter_map(|el| el.dyn_into::<HtmlOptionElement>().ok())
            .map(|opt| opt.value())
            .filter(|value| !value.is_empty())
            .collect()
    }

    fn on_change(&self, handler: Box<dyn Fn()>) {
        let cb = Closure::<dyn Fn()>::new(move || handler());
        let _ = self.0.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
        cb.forget();
    }
}

fn tom_select_loaded() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("TomSelect")).unwrap_or(false)
}

fn upgrade_to_tom_select(element: &Element, options: &[PickerOption]) -> Result<TomSelect, String> {
    let settings = TomSelectSettings { options, plugins: ["remove_button"] };
    let settings = settings
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| e.to_string())?;
    let picker = TomSelect::new(element, &settings).map_err(|e| format!("{:?}", e))?;

    // Close the dropdown after each pick so the next one starts from a clean textbox
    let this = picker.clone();
    let on_item_add = Closure::<dyn Fn()>::new(move || {
        this.set_textbox_value("");
        this.blur();
    });
    picker.on("item_add", on_item_add.as_ref().unchecked_ref());
    on_item_add.forget();

    Ok(picker)
}

/// Picker for the select with `id`, or `None` when the page has no such element
fn build_picker(id: &str, options: &[PickerOption]) -> Option<Box<dyn Picker>> {
    let element = super::by_id::<Element>(id)?;
    if tom_select_loaded() {
        match upgrade_to_tom_select(&element, options) {
            Ok(picker) => return Some(Box::new(TomSelectPicker(picker))),
            Err(e) => log::warn!("[FILTER] TomSelect init failed for #{}: {}", id, e),
        }
    }
    let select = element.dyn_into::<HtmlSelectElement>().ok()?;
    Some(Box::new(NativeSelectPicker(select)))
}

/// Wire the filter widgets to the table rows and apply the initial filter
pub fn bind_filters(data: &PageData) {
    let rows = super::rows::collect_rows();
    let priority = super::by_id::<HtmlInputElement>(PRIORITY_TOGGLE_ID)
        .map(|input| Box::new(CheckboxToggle(input)) as Box<dyn Toggle>);
    let recruiters = build_picker(RECRUITER_FILTER_ID, &recruiter_options(data));
    let vacancies = build_picker(VACANCY_FILTER_ID, &vacancy_options(data));

    log::info!(
        "[FILTER] {} rows, priority toggle: {}, recruiter picker: {}, vacancy picker: {}",
        rows.len(),
        priority.is_some(),
        recruiters.is_some(),
        vacancies.is_some()
    );

    FilterEvaluator::bind(Rc::new(FilterEvaluator::new(rows, priority, recruiters, vacancies)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recruiter_options_keep_ids_as_values() {
        let mut data = PageData::default();
        data.coworkers.insert("12".into(), "Anna".into());
        data.coworkers.insert("3".into(), "Boris".into());

        let options = recruiter_options(&data);
        assert_eq!(options.len(), 2);
        assert!(options.contains(&PickerOption { value: "12".into(), text: "Anna".into() }));
        assert!(options.contains(&PickerOption { value: "3".into(), text: "Boris".into() }));
    }

    #[test]
    fn test_vacancy_options_drop_duplicates_in_order() {
        let data = PageData {
            vacancies: vec!["QA".into(), "Backend Engineer".into(), "QA".into()],
            ..Default::default()
        };
        let values: Vec<_> = vacancy_options(&data).into_iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["QA", "Backend Engineer"]);
    }

    #[test]
    fn test_settings_omit_empty_options() {
        let empty = serde_json::to_value(TomSelectSettings { options: &[], plugins: ["remove_button"] }).unwrap();
        assert_eq!(empty, serde_json::json!({"plugins": ["remove_button"]}));

        let opts = vec![PickerOption { value: "1".into(), text: "Anna".into() }];
        let full = serde_json::to_value(TomSelectSettings { options: &opts, plugins: ["remove_button"] }).unwrap();
        assert_eq!(full["options"][0]["text"], "Anna");
    }
}
