// SPDX-License-Identifier: MIT

//! Account payload returned by the credential exchange.

use serde::{Deserialize, Serialize};

use crate::models::NutritionTargets;

/// User account data returned when an identity token is exchanged for a
/// backend session.
///
/// `is_onboarding_completed` drives the login → {dashboard |
/// physical-data-entry} branch; `nutritional_needs` is present once the
/// server has computed targets for the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub uid: String,
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub is_onboarding_completed: bool,
    #[serde(default)]
    pub nutritional_needs: Option<NutritionTargets>,
}
