// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod api;
pub mod auth;
pub mod chat;
pub mod identity;
pub mod scope;
pub mod search;
pub mod sync;

pub use api::{ApiClient, NutritionApi};
pub use auth::{AuthService, Registration, SignIn};
pub use chat::ChatService;
pub use identity::{IdentityProvider, RegisterOutcome};
pub use scope::ScreenScope;
pub use search::SearchService;
pub use sync::{AppEvent, RefreshOutcome, RefreshReport, StoreState, Synchronizer};
