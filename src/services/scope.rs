// SPDX-License-Identifier: MIT

//! Screen-scoped task lifetimes.
//!
//! Work spawned through a [`ScreenScope`] is tied to that screen's visible
//! lifetime. Cancelling the scope (or dropping it when the screen is torn
//! down) stops every spawned task before its result is applied, so a
//! cancelled task can never mutate a snapshot.

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct ScreenScope {
    token: CancellationToken,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Spawn a task bound to this scope.
    ///
    /// The handle resolves to `None` if the scope was cancelled before the
    /// task finished; its partial work is dropped, not applied.
    pub fn spawn<F>(&self, fut: F) -> JoinHandle<Option<F::Output>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => None,
                out = fut => Some(out),
            }
        })
    }

    /// Cancel all tasks spawned through this scope.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Default for ScreenScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
