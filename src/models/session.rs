// SPDX-License-Identifier: MIT

//! Locally persisted session record.

use serde::{Deserialize, Serialize};

use crate::models::NutritionTargets;

/// Session state persisted to durable local storage.
///
/// Created on the first successful credential exchange; updated when the
/// onboarding flag or the cached nutrition targets change; cleared wholesale
/// on logout or when the backend reports the account invalid. Raw credentials
/// are never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: String,
    pub display_name: Option<String>,
    /// Server-reported, per-account flag
    pub onboarding_complete: bool,
    /// Targets cached so the dashboard can render before the first refresh
    pub cached_targets: Option<NutritionTargets>,
    /// Last write timestamp (RFC 3339)
    pub updated_at: String,
}

impl SessionRecord {
    pub fn new(user_id: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name,
            onboarding_complete: false,
            cached_targets: None,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Stamp the record with the current time, returning it for chaining.
    pub fn touched(mut self) -> Self {
        self.updated_at = chrono::Utc::now().to_rfc3339();
        self
    }
}
