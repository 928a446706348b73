// SPDX-License-Identifier: MIT

//! Nutrition history models and the derived values computed from them.
//!
//! Derived values are pure functions of the snapshots, recomputed on every
//! read; nothing here caches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::NutritionTargets;

/// Fixed nutritional conversion constants (kcal per gram).
pub const CARB_KCAL_PER_GRAM: u32 = 4;
pub const PROTEIN_KCAL_PER_GRAM: u32 = 4;
pub const FAT_KCAL_PER_GRAM: u32 = 9;

/// One tracked macro dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Macro {
    Calories,
    Carbs,
    Protein,
    Fat,
}

impl Macro {
    pub fn as_str(&self) -> &'static str {
        match self {
            Macro::Calories => "calories",
            Macro::Carbs => "carbs",
            Macro::Protein => "protein",
            Macro::Fat => "fat",
        }
    }
}

/// Totals consumed today, as reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSummary {
    pub total_calories: u32,
    pub total_carbs: u32,
    pub total_protein: u32,
    pub total_fat: u32,
}

impl NutritionSummary {
    /// Macros whose consumed total exceeds its daily target.
    pub fn over_limits(&self, target: &NutritionTargets) -> Vec<Macro> {
        let mut over = Vec::new();
        if self.total_calories > target.calories {
            over.push(Macro::Calories);
        }
        if self.total_carbs > target.carbs {
            over.push(Macro::Carbs);
        }
        if self.total_protein > target.protein {
            over.push(Macro::Protein);
        }
        if self.total_fat > target.fat {
            over.push(Macro::Fat);
        }
        over
    }

    /// Calorie contribution of each macro at the fixed conversion rates.
    pub fn calorie_equivalents(&self) -> MacroCalories {
        MacroCalories::from_grams(self.total_carbs, self.total_protein, self.total_fat)
    }
}

/// Calorie contribution per macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroCalories {
    pub carbs: u32,
    pub protein: u32,
    pub fat: u32,
}

impl MacroCalories {
    pub fn from_grams(carbs: u32, protein: u32, fat: u32) -> Self {
        Self {
            carbs: carbs * CARB_KCAL_PER_GRAM,
            protein: protein * PROTEIN_KCAL_PER_GRAM,
            fat: fat * FAT_KCAL_PER_GRAM,
        }
    }
}

/// A meal already logged today.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub food_name: String,
    pub calories: u32,
    pub carbs: u32,
    pub protein: u32,
    pub fat: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    /// RFC 3339 timestamp assigned by the server
    #[serde(default)]
    pub meal_time: Option<String>,
}

impl Meal {
    /// Parsed meal timestamp, if the server sent a valid one.
    pub fn logged_at(&self) -> Option<DateTime<Utc>> {
        self.meal_time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Request body for logging a meal.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealLog {
    #[validate(length(min = 1, max = 200, message = "food name must be 1-200 characters"))]
    pub food_name: String,
    pub calories: u32,
    pub carbs: u32,
    pub protein: u32,
    pub fat: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Today's nutrition history: summary totals plus the ordered meal list.
///
/// Replaced wholesale on every refresh, same discipline as the profile
/// snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionHistory {
    #[serde(default)]
    pub summary: NutritionSummary,
    #[serde(default)]
    pub meals: Vec<Meal>,
}
