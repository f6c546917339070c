//! Frontend Models
//!
//! Wire structures exchanged with the report backend and page-embedded data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Snapshot returned by the status endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobStatus {
    pub is_updating: bool,
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Preformatted label; some backends send it alongside or instead of `last_updated`
    #[serde(default)]
    pub last_updated_str: Option<String>,
}

impl JobStatus {
    /// Status shown right after a manual refresh was accepted, before the next poll
    pub fn updating() -> Self {
        Self {
            is_updating: true,
            last_updated: None,
            last_updated_str: None,
        }
    }

    /// "Last updated" text to show, preferring the preformatted label
    pub fn label(&self) -> Option<&str> {
        self.last_updated_str
            .as_deref()
            .or(self.last_updated.as_deref())
            .filter(|label| !label.trim().is_empty())
    }
}

/// Body returned by the refresh endpoint on success
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub message: String,
}

/// Persist request for a single vacancy comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentUpdate<'a> {
    pub vacancy_name: &'a str,
    pub comment: &'a str,
}

/// Error payload sent with non-success responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Picker options embedded by the page template
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageData {
    /// Recruiter id (as rendered) -> display name
    pub coworkers: BTreeMap<String, String>,
    pub vacancies: Vec<String>,
}
