// SPDX-License-Identifier: MIT

//! Nutrition news feed items.

use serde::{Deserialize, Serialize};

/// A news article surfaced on the dashboard news tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub source: String,
    pub title: String,
    pub link: String,
    pub pub_date: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}
