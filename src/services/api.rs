// SPDX-License-Identifier: MIT

//! Backend API client.
//!
//! Handles:
//! - Bearer-token authenticated JSON endpoints
//! - The `{status, message, data}` response envelope
//! - Multipart image upload for search/prediction
//! - Account-invalidation detection (401/404 on the profile endpoint)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    FoodPrediction, HealthStats, MealLog, NewsItem, NutritionHistory, ProfileUpdate, Recipe,
    Recognition, UserData, UserProfile,
};

/// The remote API surface the client core consumes.
///
/// Object-safe so tests can drive the core with instrumented fakes.
#[async_trait]
pub trait NutritionApi: Send + Sync {
    /// Exchange an identity token for a backend session.
    async fn exchange_credential(&self, id_token: &str) -> Result<UserData>;

    /// Fetch the full profile. 401/404 here means the account is gone.
    async fn get_profile(&self, token: &str, uid: &str) -> Result<UserProfile>;

    /// Submit a full profile update; returns the recomputed health stats.
    async fn update_profile(
        &self,
        token: &str,
        uid: &str,
        update: &ProfileUpdate,
    ) -> Result<HealthStats>;

    async fn get_today_history(&self, token: &str) -> Result<NutritionHistory>;

    async fn log_meal(&self, token: &str, meal: &MealLog) -> Result<NutritionHistory>;

    async fn get_recommendations(&self, token: &str) -> Result<Vec<Recipe>>;

    async fn get_news(&self, token: &str) -> Result<Vec<NewsItem>>;

    async fn send_chat_message(&self, token: &str, message: &str) -> Result<String>;

    async fn search_by_text(&self, token: &str, query: &str) -> Result<Vec<Recipe>>;

    async fn search_by_image(
        &self,
        token: &str,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<Vec<Recipe>>;

    async fn predict_food(
        &self,
        token: &str,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<FoodPrediction>;
}

/// Response envelope wrapping every endpoint's payload.
///
/// Absent `data` signals a handled failure; `message` carries the reason.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[allow(dead_code)]
    status: String,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T> {
    match envelope.data {
        Some(data) => Ok(data),
        None => Err(AppError::Api(envelope.message)),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialExchange<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct RecipeResults {
    #[serde(default)]
    recipes: Vec<Recipe>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdateAck {
    health_stats: HealthStats,
}

#[derive(Serialize)]
struct ChatOutgoing<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

#[derive(Deserialize)]
struct PredictPayload {
    #[serde(default)]
    recognition: Option<Recognition>,
    #[serde(default)]
    recommendations: Option<RecipeResults>,
}

/// HTTP implementation of [`NutritionApi`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client with the configured base URL and bounded timeouts.
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = std::time::Duration::from_secs(config.request_timeout_secs);
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Generic GET request with an enveloped JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str, token: &str) -> Result<T> {
        let response = self.http.get(url).bearer_auth(token).send().await?;
        self.parse_envelope(response).await
    }

    /// Check response status and parse the envelope body.
    async fn parse_envelope<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api(format!("HTTP {}: {}", status, body)));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::Api(format!("JSON parse error: {}", e)))?;
        unwrap_envelope(envelope)
    }

    fn image_form(image: Vec<u8>, filename: &str) -> reqwest::multipart::Form {
        let part = reqwest::multipart::Part::bytes(image).file_name(filename.to_string());
        reqwest::multipart::Form::new().part("file", part)
    }
}

#[async_trait]
impl NutritionApi for ApiClient {
    async fn exchange_credential(&self, id_token: &str) -> Result<UserData> {
        let response = self
            .http
            .post(self.url("api/auth/google"))
            .json(&CredentialExchange { id_token })
            .send()
            .await?;
        self.parse_envelope(response).await
    }

    async fn get_profile(&self, token: &str, uid: &str) -> Result<UserProfile> {
        let url = self.url(&format!("api/users/{}/profile", uid));
        let response = self.http.get(&url).bearer_auth(token).send().await?;

        // 401/404 on the profile endpoint specifically means the account no
        // longer exists server-side.
        if matches!(response.status().as_u16(), 401 | 404) {
            return Err(AppError::AccountInvalid);
        }

        self.parse_envelope(response).await
    }

    async fn update_profile(
        &self,
        token: &str,
        uid: &str,
        update: &ProfileUpdate,
    ) -> Result<HealthStats> {
        let url = self.url(&format!("api/users/{}/profile", uid));
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;
        let ack: ProfileUpdateAck = self.parse_envelope(response).await?;
        Ok(ack.health_stats)
    }

    async fn get_today_history(&self, token: &str) -> Result<NutritionHistory> {
        self.get_json(&self.url("api/tracker/history"), token).await
    }

    async fn log_meal(&self, token: &str, meal: &MealLog) -> Result<NutritionHistory> {
        let response = self
            .http
            .post(self.url("api/tracker/meals"))
            .bearer_auth(token)
            .json(meal)
            .send()
            .await?;
        self.parse_envelope(response).await
    }

    async fn get_recommendations(&self, token: &str) -> Result<Vec<Recipe>> {
        let results: RecipeResults = self
            .get_json(&self.url("api/search/recommendations"), token)
            .await?;
        Ok(results.recipes)
    }

    async fn get_news(&self, token: &str) -> Result<Vec<NewsItem>> {
        self.get_json(&self.url("api/news"), token).await
    }

    async fn send_chat_message(&self, token: &str, message: &str) -> Result<String> {
        let response = self
            .http
            .post(self.url("api/chat"))
            .bearer_auth(token)
            .json(&ChatOutgoing { message })
            .send()
            .await?;
        let reply: ChatReply = self.parse_envelope(response).await?;
        Ok(reply.reply)
    }

    async fn search_by_text(&self, token: &str, query: &str) -> Result<Vec<Recipe>> {
        let response = self
            .http
            .get(self.url("api/search/query"))
            .bearer_auth(token)
            .query(&[("q", query)])
            .send()
            .await?;
        let results: RecipeResults = self.parse_envelope(response).await?;
        Ok(results.recipes)
    }

    async fn search_by_image(
        &self,
        token: &str,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<Vec<Recipe>> {
        let response = self
            .http
            .post(self.url("api/search/image"))
            .bearer_auth(token)
            .multipart(Self::image_form(image, filename))
            .send()
            .await?;
        let results: RecipeResults = self.parse_envelope(response).await?;
        Ok(results.recipes)
    }

    async fn predict_food(
        &self,
        token: &str,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<FoodPrediction> {
        let response = self
            .http
            .post(self.url("api/predict/food"))
            .bearer_auth(token)
            .multipart(Self::image_form(image, filename))
            .send()
            .await?;
        let payload: PredictPayload = self.parse_envelope(response).await?;
        Ok(FoodPrediction {
            recognition: payload.recognition,
            recipes: payload
                .recommendations
                .map(|r| r.recipes)
                .unwrap_or_default(),
        })
    }
}
