//! Dashboard Configuration
//!
//! Endpoint URLs, timings and labels. Defaults match the stock report page;
//! a page may override any subset through an embedded JSON block.

use serde::Deserialize;

/// Id of the optional `<script type="application/json">` override block
pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";
/// Id of the optional picker options block
pub const PAGE_DATA_ELEMENT_ID: &str = "dashboard-data";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub poll_interval_ms: u32,
    pub notice_timeout_ms: u32,
    pub status_url: String,
    pub refresh_url: String,
    pub comment_url: String,
    pub refresh_idle_label: String,
    pub refresh_busy_label: String,
    pub last_updated_prefix: String,
    pub last_updated_suffix: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
            notice_timeout_ms: 6000,
            status_url: "/status".to_string(),
            refresh_url: "/refresh-report".to_string(),
            comment_url: "/update-comment".to_string(),
            refresh_idle_label: "Обновить сейчас".to_string(),
            refresh_busy_label: "Обновление...".to_string(),
            last_updated_prefix: "Последнее обновление: ".to_string(),
            last_updated_suffix: " МСК".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse an override block. Blank input yields defaults; malformed input is an error
    pub fn from_json(raw: &str) -> Result<Self, String> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| format!("invalid dashboard config: {}", e))
    }

    /// Text for the "last updated" label
    pub fn last_updated_label(&self, when: &str) -> String {
        format!("{}{}{}", self.last_updated_prefix, when, self.last_updated_suffix)
    }

    pub fn refresh_label(&self, updating: bool) -> &str {
        if updating {
            &self.refresh_busy_label
        } else {
            &self.refresh_idle_label
        }
    }
}
