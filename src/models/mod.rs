// SPDX-License-Identifier: MIT

//! Data models mirroring server JSON plus locally persisted session state.

pub mod auth;
pub mod news;
pub mod nutrition;
pub mod profile;
pub mod recipe;
pub mod session;

pub use auth::UserData;
pub use news::NewsItem;
pub use nutrition::{Macro, MacroCalories, Meal, MealLog, NutritionHistory, NutritionSummary};
pub use profile::{
    activity_label, HealthStats, NutritionTargets, PhysicalData, Preferences, ProfileUpdate,
    UserProfile,
};
pub use recipe::{FoodPrediction, MacroNutrients, Recipe, Recognition};
pub use session::SessionRecord;
