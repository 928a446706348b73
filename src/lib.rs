// SPDX-License-Identifier: MIT

//! Client-side core for the Nutrack nutrition-tracking app.
//!
//! This crate owns session state resolution, navigation rules, and the
//! synchronization of profile/nutrition snapshots with the backend API. The
//! rendering layer subscribes to state and events; platform services
//! (identity SDK, durable storage) plug in behind trait seams.

pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod services;
pub mod storage;

use std::sync::Arc;

use config::Config;
use error::Result;
use navigation::StartFlags;
use services::api::NutritionApi;
use services::identity::IdentityProvider;
use storage::SessionStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Explicitly owned session context injected into every component that
/// touches the backend, the identity provider, or durable storage.
///
/// Constructed once by the app shell; cloning shares the underlying
/// collaborators.
#[derive(Clone)]
pub struct SessionContext {
    pub config: Config,
    pub api: Arc<dyn NutritionApi>,
    pub identity: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn SessionStore>,
}

impl SessionContext {
    pub fn new(
        config: Config,
        api: Arc<dyn NutritionApi>,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            api,
            identity,
            store,
        }
    }

    /// Gather the flags that decide the start screen.
    pub async fn start_flags(&self) -> Result<StartFlags> {
        let has_credential = self.identity.has_credential().await;
        let seen_intro = self.store.intro_seen().await?;
        let onboarding_complete = self
            .store
            .load()
            .await?
            .map(|record| record.onboarding_complete)
            .unwrap_or(false);

        Ok(StartFlags {
            has_credential,
            seen_intro,
            onboarding_complete,
        })
    }
}

/// Initialize structured JSON logging. Called once by the app shell.
pub fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nutrack_core=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
