// SPDX-License-Identifier: MIT

//! Screen resolution and navigation state machine.
//!
//! Pure and synchronous: no storage or network access. The services layer
//! performs side effects (persisting flags, clearing the session) and feeds
//! the outcomes in as [`NavEvent`]s; the router only decides which
//! transitions are allowed and what the back history looks like afterwards.

use serde::{Deserialize, Serialize};

/// Every screen the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    OnboardingIntro,
    Login,
    Register,
    PhysicalDataEntry,
    Dashboard,
    Profile,
    EditProfile,
}

/// Inputs to start-screen resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct StartFlags {
    /// A usable identity credential exists
    pub has_credential: bool,
    /// One-time, device-local flag; independent of any account
    pub seen_intro: bool,
    /// Server-reported, per-account onboarding flag
    pub onboarding_complete: bool,
}

/// Pick the screen to show at startup. Pure function of the three flags.
///
/// The intro flag only matters while there is no credential: a signed-in
/// user never sees the intro again regardless of it.
pub fn resolve_start_screen(flags: StartFlags) -> Screen {
    match (flags.has_credential, flags.seen_intro) {
        (false, false) => Screen::OnboardingIntro,
        (false, true) => Screen::Login,
        (true, _) => {
            if flags.onboarding_complete {
                Screen::Dashboard
            } else {
                Screen::PhysicalDataEntry
            }
        }
    }
}

/// Navigation triggers. Each carries the outcome that decides its branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// User dismissed the one-time intro
    IntroDismissed,
    /// User opened the registration screen from login
    OpenRegister,
    /// Credential exchange succeeded; branch on the server-reported flag
    LoginSucceeded { onboarding_complete: bool },
    /// Account creation finished; `authenticated` is true when the provider
    /// returned a fully signed-in identity (federated sign-up), false when a
    /// separate login step is still required (password sign-up)
    RegisterSucceeded { authenticated: bool },
    /// Server confirmed the physical-data submission
    PhysicalDataSaved,
    OpenProfile,
    OpenEditProfile,
    Back,
    /// Explicit logout or server-side account invalidation
    SignedOut,
}

/// A transition outside the allowed set.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("navigation event {event:?} not allowed on screen {from:?}")]
pub struct NavError {
    pub from: Screen,
    pub event: NavEvent,
}

/// Current screen plus back history, with the transition set enforced.
#[derive(Debug, Clone)]
pub struct Router {
    stack: Vec<Screen>,
}

impl Router {
    pub fn new(start: Screen) -> Self {
        Self { stack: vec![start] }
    }

    pub fn current(&self) -> Screen {
        *self.stack.last().expect("stack is never empty")
    }

    /// Depth of the back history (1 = nothing to go back to).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Apply a navigation event, returning the new current screen.
    ///
    /// Disallowed transitions leave the router untouched.
    pub fn apply(&mut self, event: NavEvent) -> Result<Screen, NavError> {
        use NavEvent::*;
        use Screen::*;

        let from = self.current();
        match (from, event) {
            (OnboardingIntro, IntroDismissed) => self.replace_all(Login),
            (Login, OpenRegister) => self.stack.push(Register),
            (Login, LoginSucceeded {
                onboarding_complete,
            }) => {
                let next = if onboarding_complete {
                    Dashboard
                } else {
                    PhysicalDataEntry
                };
                self.replace_all(next);
            }
            (Register, RegisterSucceeded { authenticated }) => {
                let next = if authenticated {
                    PhysicalDataEntry
                } else {
                    Login
                };
                self.replace_all(next);
            }
            // Prior screens are evicted so a half-onboarded account cannot
            // navigate back into the auth flow.
            (PhysicalDataEntry, PhysicalDataSaved) => self.replace_all(Dashboard),
            (Dashboard, OpenProfile) => self.stack.push(Profile),
            (Profile, OpenEditProfile) => self.stack.push(EditProfile),
            (Dashboard | Profile | EditProfile | PhysicalDataEntry, SignedOut) => {
                self.replace_all(Login)
            }
            (PhysicalDataEntry, Back) => return Err(NavError { from, event }),
            (_, Back) => {
                if self.stack.len() < 2 {
                    return Err(NavError { from, event });
                }
                self.stack.pop();
            }
            _ => return Err(NavError { from, event }),
        }
        Ok(self.current())
    }

    fn replace_all(&mut self, screen: Screen) {
        self.stack.clear();
        self.stack.push(screen);
    }
}
