// SPDX-License-Identifier: MIT

//! Profile/nutrition synchronizer.
//!
//! Owns the single in-memory copy of the four server-backed views (profile,
//! today's history, recommendations, news) and keeps them consistent with
//! the backend:
//! - `refresh` fetches all four concurrently and replaces each snapshot
//!   atomically; a refresh issued while one is in flight subscribes to the
//!   running refresh instead of issuing duplicate requests
//! - mutations (log a meal, update the profile) never patch local state;
//!   they submit to the server and then refresh, so displayed aggregates are
//!   always server-authoritative
//!
//! State is published through a `watch` channel; discrete occurrences
//! (forced navigation, transient notices, over-limit warnings) through a
//! `broadcast` channel. The rendering layer subscribes to both.

use std::sync::Mutex as StdMutex;

use tokio::sync::{broadcast, watch};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{
    Macro, MealLog, NewsItem, NutritionHistory, ProfileUpdate, Recipe, UserProfile,
};
use crate::navigation::Screen;
use crate::SessionContext;

/// The four snapshots, replaced wholesale and never patched.
///
/// They are mutually consistent only immediately after a fully successful
/// refresh; each field is individually "as of its last successful fetch."
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub profile: Option<UserProfile>,
    pub history: Option<NutritionHistory>,
    pub recommendations: Vec<Recipe>,
    pub news: Vec<NewsItem>,
}

/// Discrete occurrences the rendering layer reacts to.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The shell must navigate to the given screen. Emitted *before* the
    /// teardown side effects so a dashboard is never rendered over a
    /// half-cleared session.
    Navigate(Screen),
    /// Transient user-visible notice; previously displayed state stays put
    Notice(String),
    /// Today's totals changed and now exceed at least one daily target
    OverLimit(Vec<Macro>),
}

/// Which sub-fetches replaced their snapshot during a refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub profile: bool,
    pub history: bool,
    pub recommendations: bool,
    pub news: bool,
}

/// How a refresh settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// All four fetches settled; any that failed kept their previous
    /// snapshot and surfaced a notice
    Completed(RefreshReport),
    /// The credential or account is gone; the session was torn down
    SignedOut,
}

enum Claim {
    Runner(watch::Sender<Option<RefreshOutcome>>),
    Waiter(watch::Receiver<Option<RefreshOutcome>>),
}

/// Synchronizes the in-memory snapshots with the backend.
pub struct Synchronizer {
    ctx: SessionContext,
    state_tx: watch::Sender<StoreState>,
    events_tx: broadcast::Sender<AppEvent>,
    inflight: StdMutex<Option<watch::Receiver<Option<RefreshOutcome>>>>,
}

impl Synchronizer {
    pub fn new(ctx: SessionContext) -> Self {
        let (state_tx, _) = watch::channel(StoreState::default());
        let (events_tx, _) = broadcast::channel(32);
        Self {
            ctx,
            state_tx,
            events_tx,
            inflight: StdMutex::new(None),
        }
    }

    /// Current snapshots (cloned).
    pub fn state(&self) -> StoreState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe_state(&self) -> watch::Receiver<StoreState> {
        self.state_tx.subscribe()
    }

    /// Subscribe to discrete events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<AppEvent> {
        self.events_tx.subscribe()
    }

    /// True while a refresh is running. Always false once `refresh` has
    /// settled, however many sub-fetches failed.
    pub fn is_refreshing(&self) -> bool {
        self.inflight.lock().unwrap().is_some()
    }

    /// Macros currently over their daily target. Pure function of the
    /// snapshots, recomputed on every call.
    pub fn over_limits(&self) -> Vec<Macro> {
        let state = self.state_tx.borrow();
        match (&state.history, &state.profile) {
            (Some(history), Some(profile)) => {
                history.summary.over_limits(&profile.nutritional_needs)
            }
            _ => Vec::new(),
        }
    }

    // ─── Refresh ─────────────────────────────────────────────────────────

    /// Re-fetch all four server-backed views and replace the snapshots.
    ///
    /// Returns once every fetch has settled. Concurrent callers coalesce
    /// onto the refresh already in flight and receive its outcome.
    pub async fn refresh(&self) -> RefreshOutcome {
        match self.claim_refresh() {
            Claim::Waiter(mut rx) => loop {
                if let Some(outcome) = *rx.borrow_and_update() {
                    return outcome;
                }
                if rx.changed().await.is_err() {
                    // Runner dropped mid-flight (task cancelled); nothing
                    // was applied on our behalf.
                    return RefreshOutcome::Completed(RefreshReport::default());
                }
            },
            Claim::Runner(outcome_tx) => {
                let outcome = self.run_refresh().await;
                *self.inflight.lock().unwrap() = None;
                let _ = outcome_tx.send(Some(outcome));
                outcome
            }
        }
    }

    fn claim_refresh(&self) -> Claim {
        let mut inflight = self.inflight.lock().unwrap();
        match inflight.as_ref() {
            Some(rx) => Claim::Waiter(rx.clone()),
            None => {
                let (tx, rx) = watch::channel(None);
                *inflight = Some(rx);
                Claim::Runner(tx)
            }
        }
    }

    async fn run_refresh(&self) -> RefreshOutcome {
        let record = match self.ctx.store.load().await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::warn!("Refresh without a session record, signing out");
                self.tear_down().await;
                return RefreshOutcome::SignedOut;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session record unreadable");
                self.notice("Could not read the saved session");
                return RefreshOutcome::Completed(RefreshReport::default());
            }
        };

        let token = match self.ctx.identity.fresh_token().await {
            Ok(token) => token,
            Err(e) => {
                tracing::info!(error = %e, "Credential unavailable, signing out");
                self.tear_down().await;
                return RefreshOutcome::SignedOut;
            }
        };

        let api = &self.ctx.api;
        let (profile_res, history_res, recs_res, news_res) = tokio::join!(
            api.get_profile(&token, &record.user_id),
            api.get_today_history(&token),
            api.get_recommendations(&token),
            api.get_news(&token),
        );

        let mut report = RefreshReport::default();

        let profile = match profile_res {
            Ok(profile) => {
                report.profile = true;
                Some(profile)
            }
            Err(e) if e.invalidates_session() => {
                tracing::warn!(user_id = %record.user_id, "Account invalidated by server");
                self.tear_down().await;
                return RefreshOutcome::SignedOut;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Profile fetch failed, keeping previous snapshot");
                self.notice("Could not refresh your profile");
                None
            }
        };

        let history = match history_res {
            Ok(history) => {
                report.history = true;
                Some(history)
            }
            Err(e) => {
                tracing::warn!(error = %e, "History fetch failed, keeping previous snapshot");
                self.notice("Could not refresh today's history");
                None
            }
        };

        let recommendations = match recs_res {
            Ok(recipes) => {
                report.recommendations = true;
                Some(recipes)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Recommendations fetch failed");
                self.notice("Could not refresh recommendations");
                None
            }
        };

        let news = match news_res {
            Ok(items) => {
                report.news = true;
                Some(items)
            }
            Err(e) => {
                tracing::warn!(error = %e, "News fetch failed");
                self.notice("Could not refresh news");
                None
            }
        };

        let new_targets = profile.as_ref().map(|p| p.nutritional_needs);

        // Replace the snapshots that fetched successfully; detect whether
        // the summary change pushed any macro over its target.
        let mut over = Vec::new();
        self.state_tx.send_modify(|state| {
            if let Some(profile) = profile {
                state.profile = Some(profile);
            }
            if let Some(new_history) = history {
                let summary_changed =
                    state.history.as_ref().map(|h| h.summary) != Some(new_history.summary);
                if summary_changed {
                    if let Some(profile) = state.profile.as_ref() {
                        over = new_history
                            .summary
                            .over_limits(&profile.nutritional_needs);
                    }
                }
                state.history = Some(new_history);
            }
            if let Some(recipes) = recommendations {
                state.recommendations = recipes;
            }
            if let Some(items) = news {
                state.news = items;
            }
        });

        if !over.is_empty() {
            self.emit(AppEvent::OverLimit(over));
        }

        // Keep the cached targets in the persisted record current so the
        // next cold start renders the right rings before its first refresh.
        if let Some(targets) = new_targets {
            if record.cached_targets != Some(targets) {
                let mut updated = record.clone();
                updated.cached_targets = Some(targets);
                if let Err(e) = self.ctx.store.save(&updated.touched()).await {
                    tracing::warn!(error = %e, "Failed to cache nutrition targets");
                }
            }
        }

        tracing::debug!(?report, "Refresh settled");
        RefreshOutcome::Completed(report)
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Log a meal, then refresh so displayed aggregates reflect server
    /// state. Local totals are never updated optimistically.
    pub async fn log_meal(&self, meal: MealLog) -> Result<RefreshOutcome> {
        meal.validate()?;
        let token = self.ctx.identity.fresh_token().await?;
        self.ctx.api.log_meal(&token, &meal).await?;
        tracing::info!(food = %meal.food_name, calories = meal.calories, "Meal logged");
        Ok(self.refresh().await)
    }

    /// Change the activity level, carrying every other field over from the
    /// current profile snapshot.
    ///
    /// Fails with `NotReady` before any network call when no snapshot has
    /// been fetched yet.
    pub async fn update_activity_level(&self, new_level: f64) -> Result<RefreshOutcome> {
        let profile = self
            .state_tx
            .borrow()
            .profile
            .clone()
            .ok_or(AppError::NotReady)?;
        let update = ProfileUpdate::with_activity_level(&profile, new_level);
        self.submit_profile_update(&update).await
    }

    /// Submit a full physical-data update.
    pub async fn update_physical_data(&self, update: ProfileUpdate) -> Result<RefreshOutcome> {
        self.submit_profile_update(&update).await
    }

    async fn submit_profile_update(&self, update: &ProfileUpdate) -> Result<RefreshOutcome> {
        update.validate()?;
        let record = self
            .ctx
            .store
            .load()
            .await?
            .ok_or(AppError::AuthExpired)?;
        let token = self.ctx.identity.fresh_token().await?;
        self.ctx
            .api
            .update_profile(&token, &record.user_id, update)
            .await?;
        tracing::info!(user_id = %record.user_id, "Profile update accepted");
        Ok(self.refresh().await)
    }

    // ─── Teardown ────────────────────────────────────────────────────────

    /// Explicit logout: navigate away, then clear everything.
    pub async fn sign_out(&self) {
        tracing::info!("Signing out");
        self.tear_down().await;
    }

    /// Ordered teardown: the navigation event goes out first, then the
    /// identity sign-out, the record clear, and the snapshot reset.
    async fn tear_down(&self) {
        self.emit(AppEvent::Navigate(Screen::Login));
        self.ctx.identity.sign_out().await;
        if let Err(e) = self.ctx.store.clear().await {
            tracing::warn!(error = %e, "Session clear failed");
        }
        self.state_tx.send_replace(StoreState::default());
    }

    fn emit(&self, event: AppEvent) {
        // No subscribers is fine; events are fire-and-forget.
        let _ = self.events_tx.send(event);
    }

    fn notice(&self, message: &str) {
        self.emit(AppEvent::Notice(message.to_string()));
    }
}
