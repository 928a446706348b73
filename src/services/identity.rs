// SPDX-License-Identifier: MIT

//! Identity provider seam.
//!
//! The platform SDK (federated sign-in, email/password accounts) lives
//! behind this trait. Tokens are force-refreshed before every use and never
//! cached by this crate.

use async_trait::async_trait;

use crate::error::Result;

/// How an account-creation attempt left the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The provider returned a fully-authenticated identity (federated
    /// sign-up); a token can be fetched immediately.
    SignedIn,
    /// The account exists but a separate login step is required (password
    /// sign-up).
    LoginRequired,
}

/// External identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Whether a signed-in identity currently exists on this device.
    async fn has_credential(&self) -> bool;

    /// Force-refresh and return a bearer identity token.
    ///
    /// Fails with `AuthExpired` when no identity is signed in or the
    /// provider refuses to mint a token.
    async fn fresh_token(&self) -> Result<String>;

    /// Create an email/password account.
    async fn register(&self, email: &str, password: &str) -> Result<RegisterOutcome>;

    /// Drop the signed-in identity. Infallible by contract: a provider that
    /// cannot sign out still forgets the local identity.
    async fn sign_out(&self);
}
