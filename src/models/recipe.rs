// SPDX-License-Identifier: MIT

//! Recipe and food-recognition models.

use serde::{Deserialize, Serialize};

use crate::models::nutrition::{MacroCalories, MealLog};

/// Macro content of a recipe serving (grams).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MacroNutrients {
    pub carbs: u32,
    pub protein: u32,
    pub fat: u32,
}

impl MacroNutrients {
    /// Calorie contribution of each macro at the fixed conversion rates.
    pub fn calorie_equivalents(&self) -> MacroCalories {
        MacroCalories::from_grams(self.carbs, self.protein, self.fat)
    }
}

/// A recommended or searched recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub label: String,
    #[serde(default)]
    pub image: Option<String>,
    pub calories: u32,
    #[serde(default)]
    pub nutrients: MacroNutrients,
    /// Preparation time in minutes; 0 when unknown
    #[serde(default)]
    pub time: u32,
    /// Serving weight in grams; 0.0 when unknown
    #[serde(default)]
    pub total_weight: f64,
    #[serde(default)]
    pub cuisine_type: Option<Vec<String>>,
    #[serde(default)]
    pub meal_type: Option<Vec<String>>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub source_url: Option<String>,
}

impl Recipe {
    /// Meal-log payload for cooking this recipe.
    pub fn to_meal_log(&self) -> MealLog {
        MealLog {
            food_name: self.label.clone(),
            calories: self.calories,
            carbs: self.nutrients.carbs,
            protein: self.nutrients.protein,
            fat: self.nutrients.fat,
            image_url: self.image.clone(),
            source_url: self.source_url.clone(),
        }
    }
}

/// Classifier output for a food photo.
///
/// Field names match the prediction service's snake_case JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recognition {
    pub predicted_class: String,
    pub predicted_prob: f64,
}

/// Result of predicting food from an image: what the classifier saw, plus
/// recipes matched to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodPrediction {
    #[serde(default)]
    pub recognition: Option<Recognition>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}
