// SPDX-License-Identifier: MIT

//! User profile models and the profile-update request payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Daily nutrition targets computed server-side from the physical profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTargets {
    pub calories: u32,
    pub carbs: u32,
    pub protein: u32,
    pub fat: u32,
}

/// Physical attributes as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalData {
    /// 0: male, 1: female
    pub gender: u8,
    pub age: u32,
    /// Height in centimeters
    pub height: u32,
    /// Weight in kilograms
    pub weight: u32,
    /// TDEE activity multiplier
    pub activity_level: f64,
}

/// Server-computed health metrics. Opaque to this crate; displayed as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStats {
    pub bmi: f64,
    pub bmi_status: String,
    pub bmr: u32,
    #[serde(default)]
    pub bmr_score: u32,
    #[serde(default)]
    pub bmr_label: String,
    pub tdee: u32,
}

/// Dietary preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub allergies: Vec<String>,
}

/// The full denormalized user profile, rebuilt wholesale on every refresh.
///
/// Never patched field-by-field: a refresh replaces the entire snapshot so
/// the UI can never observe a mix of old and new values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    /// YYYY-MM-DD; absent for accounts created before birthdate collection
    pub birthdate: Option<String>,
    pub physical_data: PhysicalData,
    pub health_stats: HealthStats,
    pub nutritional_needs: NutritionTargets,
    #[serde(default)]
    pub preferences: Preferences,
}

/// Fallback birthdate sent when the current profile carries none.
pub const DEFAULT_BIRTHDATE: &str = "2000-01-01";

/// Full profile-update request body (PUT profile endpoint).
///
/// Activity-level changes are submitted through this same payload with every
/// other field taken from the current snapshot, so the server always receives
/// a complete profile.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    /// YYYY-MM-DD
    #[validate(custom(function = validate_birthdate))]
    pub birthdate: String,
    /// 0: male, 1: female
    #[validate(range(max = 1, message = "gender must be 0 or 1"))]
    pub gender: u8,
    #[validate(range(min = 50, max = 260, message = "height must be 50-260 cm"))]
    pub height: u32,
    #[validate(range(min = 20, max = 400, message = "weight must be 20-400 kg"))]
    pub weight: u32,
    #[validate(range(min = 1.0, max = 2.5, message = "activity level must be 1.0-2.5"))]
    pub activity_level: f64,
    pub allergies: Vec<String>,
}

impl ProfileUpdate {
    /// Build an update that changes only the activity level, carrying every
    /// other field over from the current profile snapshot.
    pub fn with_activity_level(profile: &UserProfile, new_level: f64) -> Self {
        Self {
            name: profile.name.clone(),
            birthdate: profile
                .birthdate
                .clone()
                .unwrap_or_else(|| DEFAULT_BIRTHDATE.to_string()),
            gender: profile.physical_data.gender,
            height: profile.physical_data.height,
            weight: profile.physical_data.weight,
            activity_level: new_level,
            allergies: profile.preferences.allergies.clone(),
        }
    }
}

fn validate_birthdate(value: &str) -> Result<(), ValidationError> {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut err = ValidationError::new("birthdate");
            err.message = Some("expected YYYY-MM-DD".into());
            Err(err)
        }
    }
}

/// Allergy filters the onboarding form offers.
pub const ALLERGY_OPTIONS: [&str; 9] = [
    "gluten-free",
    "dairy-free",
    "egg-free",
    "soy-free",
    "wheat-free",
    "fish-free",
    "shellfish-free",
    "tree-nut-free",
    "peanut-free",
];

/// Activity multiplier values and their display labels.
pub const ACTIVITY_LEVELS: [(f64, &str); 5] = [
    (1.2, "Sedentary"),
    (1.375, "Lightly Active"),
    (1.55, "Moderately Active"),
    (1.725, "Very Active"),
    (1.9, "Extra Active"),
];

/// Map an activity multiplier to its display label.
///
/// Values outside the five fixed multipliers display as "Custom".
pub fn activity_label(level: f64) -> &'static str {
    ACTIVITY_LEVELS
        .iter()
        .find(|(value, _)| (value - level).abs() < f64::EPSILON)
        .map(|(_, label)| *label)
        .unwrap_or("Custom")
}
