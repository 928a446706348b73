// SPDX-License-Identifier: MIT

//! Authentication flows: credential exchange, registration, onboarding.
//!
//! Navigation branches are reported back to the caller as [`Screen`] values;
//! the caller feeds them into the router. On any failure the current screen
//! is kept and the error is surfaced as a retryable notice.

use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{HealthStats, ProfileUpdate, SessionRecord, UserData};
use crate::navigation::Screen;
use crate::services::identity::RegisterOutcome;
use crate::SessionContext;

/// Outcome of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub user: UserData,
    /// Dashboard when the account finished onboarding, physical-data entry
    /// otherwise
    pub next: Screen,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// True when the provider returned a fully-authenticated identity
    pub authenticated: bool,
    pub next: Screen,
}

/// Drives the login/registration/onboarding flows.
pub struct AuthService {
    ctx: SessionContext,
}

impl AuthService {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }

    /// Record that the one-time intro was dismissed. Survives restarts and
    /// logout.
    pub async fn dismiss_intro(&self) -> Result<()> {
        self.ctx.store.set_intro_seen().await
    }

    /// Exchange a fresh identity token for a backend session and persist
    /// the session record.
    pub async fn sign_in(&self) -> Result<SignIn> {
        let token = self.ctx.identity.fresh_token().await?;
        let user = self.ctx.api.exchange_credential(&token).await?;

        let record = SessionRecord {
            user_id: user.uid.clone(),
            display_name: user.name.clone(),
            onboarding_complete: user.is_onboarding_completed,
            cached_targets: user.nutritional_needs,
            updated_at: chrono::Utc::now().to_rfc3339(),
        };
        self.ctx.store.save(&record).await?;

        let next = if user.is_onboarding_completed {
            Screen::Dashboard
        } else {
            Screen::PhysicalDataEntry
        };

        tracing::info!(
            user_id = %user.uid,
            onboarding_complete = user.is_onboarding_completed,
            "Signed in"
        );
        Ok(SignIn { user, next })
    }

    /// Create an account. The password policy is enforced locally before the
    /// provider is contacted.
    pub async fn register(&self, email: &str, password: &str) -> Result<Registration> {
        validate_password(password)?;

        match self.ctx.identity.register(email, password).await? {
            RegisterOutcome::SignedIn => {
                // Federated sign-up: the identity is live, exchange it now.
                self.sign_in().await?;
                Ok(Registration {
                    authenticated: true,
                    next: Screen::PhysicalDataEntry,
                })
            }
            RegisterOutcome::LoginRequired => {
                tracing::info!("Account created, separate login required");
                Ok(Registration {
                    authenticated: false,
                    next: Screen::Login,
                })
            }
        }
    }

    /// Submit the onboarding physical data.
    ///
    /// The onboarding flag is persisted only after the server confirms the
    /// submission; a failed request leaves the record untouched.
    pub async fn submit_physical_data(&self, data: ProfileUpdate) -> Result<HealthStats> {
        data.validate()?;

        let mut record = self
            .ctx
            .store
            .load()
            .await?
            .ok_or(AppError::AuthExpired)?;
        let token = self.ctx.identity.fresh_token().await?;

        let stats = self
            .ctx
            .api
            .update_profile(&token, &record.user_id, &data)
            .await?;

        record.onboarding_complete = true;
        record.display_name = Some(data.name.clone());
        self.ctx.store.save(&record.touched()).await?;

        tracing::info!(bmi = stats.bmi, tdee = stats.tdee, "Onboarding complete");
        Ok(stats)
    }
}

/// Password policy for account creation: at least 8 characters with an
/// upper-case letter, a lower-case letter, a digit, and a special character,
/// and no whitespace.
pub fn validate_password(password: &str) -> Result<()> {
    const SPECIALS: &str = "@#$%^&+=!";

    let strong = password.len() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIALS.contains(c))
        && !password.chars().any(char::is_whitespace);

    if strong {
        Ok(())
    } else {
        Err(AppError::Validation(
            "password needs 8+ characters with upper, lower, digit, and special".to_string(),
        ))
    }
}
