// SPDX-License-Identifier: MIT

//! Recipe discovery: text search, image search, food prediction.
//!
//! Thin credentialed wrappers with no snapshot interaction; failures are
//! surfaced to the caller as retryable errors.

use crate::error::{AppError, Result};
use crate::models::{FoodPrediction, Recipe};
use crate::SessionContext;

pub struct SearchService {
    ctx: SessionContext,
}

impl SearchService {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }

    /// Search recipes by free text.
    pub async fn by_text(&self, query: &str) -> Result<Vec<Recipe>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("search query is empty".to_string()));
        }
        let token = self.ctx.identity.fresh_token().await?;
        self.ctx.api.search_by_text(&token, query).await
    }

    /// Search recipes matching a food photo.
    pub async fn by_image(&self, image: Vec<u8>, filename: &str) -> Result<Vec<Recipe>> {
        if image.is_empty() {
            return Err(AppError::Validation("image is empty".to_string()));
        }
        let token = self.ctx.identity.fresh_token().await?;
        self.ctx.api.search_by_image(&token, image, filename).await
    }

    /// Classify a food photo and fetch recipes matched to the prediction.
    pub async fn predict_food(&self, image: Vec<u8>, filename: &str) -> Result<FoodPrediction> {
        if image.is_empty() {
            return Err(AppError::Validation("image is empty".to_string()));
        }
        let token = self.ctx.identity.fresh_token().await?;
        let prediction = self.ctx.api.predict_food(&token, image, filename).await?;
        if let Some(recognition) = &prediction.recognition {
            tracing::debug!(
                class = %recognition.predicted_class,
                prob = recognition.predicted_prob,
                "Food predicted"
            );
        }
        Ok(prediction)
    }
}
