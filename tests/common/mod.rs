// SPDX-License-Identifier: MIT

//! Instrumented fakes and sample data shared by the integration suites.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use nutrack_core::config::Config;
use nutrack_core::error::{AppError, Result};
use nutrack_core::models::{
    FoodPrediction, HealthStats, MealLog, NewsItem, NutritionHistory, NutritionSummary,
    NutritionTargets, PhysicalData, Preferences, ProfileUpdate, Recipe, SessionRecord, UserData,
    UserProfile,
};
use nutrack_core::services::identity::{IdentityProvider, RegisterOutcome};
use nutrack_core::services::NutritionApi;
use nutrack_core::storage::{MemorySessionStore, SessionStore};
use nutrack_core::SessionContext;

/// A failure a fake endpoint can be primed with.
#[derive(Debug, Clone, Copy)]
pub enum FakeFailure {
    Network,
    AccountInvalid,
    Api,
}

impl FakeFailure {
    pub fn to_error(self) -> AppError {
        match self {
            FakeFailure::Network => AppError::Network("connection reset".to_string()),
            FakeFailure::AccountInvalid => AppError::AccountInvalid,
            FakeFailure::Api => AppError::Api("rejected".to_string()),
        }
    }
}

pub type FakeResult<T> = std::result::Result<T, FakeFailure>;

// ─── Sample data ─────────────────────────────────────────────────────────

#[allow(dead_code)]
pub fn sample_targets() -> NutritionTargets {
    NutritionTargets {
        calories: 2000,
        carbs: 250,
        protein: 100,
        fat: 70,
    }
}

#[allow(dead_code)]
pub fn sample_stats() -> HealthStats {
    HealthStats {
        bmi: 22.5,
        bmi_status: "Normal".to_string(),
        bmr: 1600,
        bmr_score: 2,
        bmr_label: "Normal".to_string(),
        tdee: 2200,
    }
}

#[allow(dead_code)]
pub fn sample_profile() -> UserProfile {
    UserProfile {
        name: "Budi".to_string(),
        email: Some("budi@example.com".to_string()),
        photo_url: None,
        birthdate: Some("1998-05-20".to_string()),
        physical_data: PhysicalData {
            gender: 0,
            age: 27,
            height: 172,
            weight: 68,
            activity_level: 1.55,
        },
        health_stats: sample_stats(),
        nutritional_needs: sample_targets(),
        preferences: Preferences {
            allergies: vec!["gluten-free".to_string()],
        },
    }
}

#[allow(dead_code)]
pub fn sample_history(calories: u32) -> NutritionHistory {
    NutritionHistory {
        summary: NutritionSummary {
            total_calories: calories,
            total_carbs: 50,
            total_protein: 50,
            total_fat: 50,
        },
        meals: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn sample_user_data(onboarding_complete: bool) -> UserData {
    UserData {
        uid: "uid-42".to_string(),
        email: "budi@example.com".to_string(),
        name: Some("Budi".to_string()),
        photo_url: None,
        is_onboarding_completed: onboarding_complete,
        nutritional_needs: onboarding_complete.then(sample_targets),
    }
}

#[allow(dead_code)]
pub fn sample_update() -> ProfileUpdate {
    ProfileUpdate {
        name: "Budi".to_string(),
        birthdate: "1998-05-20".to_string(),
        gender: 0,
        height: 172,
        weight: 68,
        activity_level: 1.55,
        allergies: vec!["gluten-free".to_string()],
    }
}

#[allow(dead_code)]
pub fn sample_meal() -> MealLog {
    MealLog {
        food_name: "Gado-gado".to_string(),
        calories: 410,
        carbs: 35,
        protein: 17,
        fat: 23,
        image_url: None,
        source_url: None,
    }
}

#[allow(dead_code)]
pub fn signed_in_record() -> SessionRecord {
    SessionRecord {
        user_id: "uid-42".to_string(),
        display_name: Some("Budi".to_string()),
        onboarding_complete: true,
        cached_targets: Some(sample_targets()),
        updated_at: chrono::Utc::now().to_rfc3339(),
    }
}

// ─── Fake API ────────────────────────────────────────────────────────────

/// Instrumented in-process backend: every endpoint is primed with a result
/// and counts its calls.
pub struct FakeApi {
    pub exchange: StdMutex<FakeResult<UserData>>,
    pub profile: StdMutex<FakeResult<UserProfile>>,
    pub history: StdMutex<FakeResult<NutritionHistory>>,
    pub recommendations: StdMutex<FakeResult<Vec<Recipe>>>,
    pub news: StdMutex<FakeResult<Vec<NewsItem>>>,
    pub log_meal_result: StdMutex<FakeResult<NutritionHistory>>,
    pub update_result: StdMutex<FakeResult<HealthStats>>,
    /// Applied at the top of each refresh fetch; lets tests hold a refresh
    /// open long enough to race a second caller against it
    pub fetch_delay: StdMutex<Duration>,

    pub exchange_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
    pub recommendation_calls: AtomicUsize,
    pub news_calls: AtomicUsize,
    pub log_meal_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            exchange: StdMutex::new(Ok(sample_user_data(true))),
            profile: StdMutex::new(Ok(sample_profile())),
            history: StdMutex::new(Ok(sample_history(800))),
            recommendations: StdMutex::new(Ok(Vec::new())),
            news: StdMutex::new(Ok(Vec::new())),
            log_meal_result: StdMutex::new(Ok(sample_history(1210))),
            update_result: StdMutex::new(Ok(sample_stats())),
            fetch_delay: StdMutex::new(Duration::ZERO),
            exchange_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
            recommendation_calls: AtomicUsize::new(0),
            news_calls: AtomicUsize::new(0),
            log_meal_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn take<T: Clone>(slot: &StdMutex<FakeResult<T>>) -> Result<T> {
        slot.lock()
            .unwrap()
            .clone()
            .map_err(FakeFailure::to_error)
    }

    async fn delay(&self) {
        let delay = *self.fetch_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl NutritionApi for FakeApi {
    async fn exchange_credential(&self, _id_token: &str) -> Result<UserData> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.exchange)
    }

    async fn get_profile(&self, _token: &str, _uid: &str) -> Result<UserProfile> {
        self.delay().await;
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.profile)
    }

    async fn update_profile(
        &self,
        _token: &str,
        _uid: &str,
        _update: &ProfileUpdate,
    ) -> Result<HealthStats> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.update_result)
    }

    async fn get_today_history(&self, _token: &str) -> Result<NutritionHistory> {
        self.delay().await;
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.history)
    }

    async fn log_meal(&self, _token: &str, _meal: &MealLog) -> Result<NutritionHistory> {
        self.log_meal_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.log_meal_result)
    }

    async fn get_recommendations(&self, _token: &str) -> Result<Vec<Recipe>> {
        self.delay().await;
        self.recommendation_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.recommendations)
    }

    async fn get_news(&self, _token: &str) -> Result<Vec<NewsItem>> {
        self.delay().await;
        self.news_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.news)
    }

    async fn send_chat_message(&self, _token: &str, _message: &str) -> Result<String> {
        Ok("Eat more vegetables".to_string())
    }

    async fn search_by_text(&self, _token: &str, _query: &str) -> Result<Vec<Recipe>> {
        Ok(Vec::new())
    }

    async fn search_by_image(
        &self,
        _token: &str,
        _image: Vec<u8>,
        _filename: &str,
    ) -> Result<Vec<Recipe>> {
        Ok(Vec::new())
    }

    async fn predict_food(
        &self,
        _token: &str,
        _image: Vec<u8>,
        _filename: &str,
    ) -> Result<FoodPrediction> {
        Ok(FoodPrediction {
            recognition: None,
            recipes: Vec::new(),
        })
    }
}

// ─── Fake identity provider ──────────────────────────────────────────────

pub struct FakeIdentity {
    /// `None` means no signed-in identity: `fresh_token` fails AuthExpired
    pub token: StdMutex<Option<String>>,
    pub register_outcome: StdMutex<FakeResult<RegisterOutcome>>,
    pub token_calls: AtomicUsize,
    pub register_calls: AtomicUsize,
    pub sign_out_calls: AtomicUsize,
}

impl FakeIdentity {
    #[allow(dead_code)]
    pub fn signed_in() -> Self {
        Self {
            token: StdMutex::new(Some("id-token-1".to_string())),
            register_outcome: StdMutex::new(Ok(RegisterOutcome::SignedIn)),
            token_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn signed_out() -> Self {
        let identity = Self::signed_in();
        *identity.token.lock().unwrap() = None;
        identity
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn has_credential(&self) -> bool {
        self.token.lock().unwrap().is_some()
    }

    async fn fresh_token(&self) -> Result<String> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        self.token
            .lock()
            .unwrap()
            .clone()
            .ok_or(AppError::AuthExpired)
    }

    async fn register(&self, _email: &str, _password: &str) -> Result<RegisterOutcome> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.register_outcome
            .lock()
            .unwrap()
            .clone()
            .map_err(FakeFailure::to_error)
    }

    async fn sign_out(&self) {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        *self.token.lock().unwrap() = None;
    }
}

// ─── Fake store ──────────────────────────────────────────────────────────

/// Memory-backed store with call counters and a hook that runs at the start
/// of `clear()`, for observing side-effect ordering.
#[derive(Default)]
pub struct FakeStore {
    inner: MemorySessionStore,
    pub save_calls: AtomicUsize,
    pub clear_calls: AtomicUsize,
    pub on_clear: StdMutex<Option<Box<dyn FnMut() + Send>>>,
}

impl FakeStore {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub async fn with_record(record: &SessionRecord) -> Self {
        let store = Self::new();
        store.inner.save(record).await.unwrap();
        store
    }
}

#[async_trait]
impl SessionStore for FakeStore {
    async fn load(&self) -> Result<Option<SessionRecord>> {
        self.inner.load().await
    }

    async fn save(&self, record: &SessionRecord) -> Result<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.save(record).await
    }

    async fn clear(&self) -> Result<()> {
        if let Some(hook) = self.on_clear.lock().unwrap().as_mut() {
            hook();
        }
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.clear().await
    }

    async fn intro_seen(&self) -> Result<bool> {
        self.inner.intro_seen().await
    }

    async fn set_intro_seen(&self) -> Result<()> {
        self.inner.set_intro_seen().await
    }
}

// ─── Context builder ─────────────────────────────────────────────────────

#[allow(dead_code)]
pub fn test_context(
    api: Arc<FakeApi>,
    identity: Arc<FakeIdentity>,
    store: Arc<dyn SessionStore>,
) -> SessionContext {
    SessionContext::new(Config::default(), api, identity, store)
}
