// SPDX-License-Identifier: MIT

//! Start-screen resolution from real identity/store state.

mod common;

use std::sync::Arc;

use common::*;
use nutrack_core::navigation::{resolve_start_screen, Screen};
use nutrack_core::storage::SessionStore;
use nutrack_core::SessionContext;

fn context(identity: FakeIdentity, store: Arc<FakeStore>) -> SessionContext {
    test_context(Arc::new(FakeApi::new()), Arc::new(identity), store)
}

#[tokio::test]
async fn test_fresh_install_starts_at_intro() {
    let ctx = context(FakeIdentity::signed_out(), Arc::new(FakeStore::new()));

    let flags = ctx.start_flags().await.unwrap();

    assert!(!flags.has_credential);
    assert!(!flags.seen_intro);
    assert_eq!(resolve_start_screen(flags), Screen::OnboardingIntro);
}

#[tokio::test]
async fn test_returning_signed_out_user_starts_at_login() {
    let store = Arc::new(FakeStore::new());
    store.set_intro_seen().await.unwrap();
    let ctx = context(FakeIdentity::signed_out(), store);

    let flags = ctx.start_flags().await.unwrap();

    assert_eq!(resolve_start_screen(flags), Screen::Login);
}

#[tokio::test]
async fn test_half_onboarded_user_starts_at_physical_data_entry() {
    let mut record = signed_in_record();
    record.onboarding_complete = false;
    let store = Arc::new(FakeStore::with_record(&record).await);
    let ctx = context(FakeIdentity::signed_in(), store);

    let flags = ctx.start_flags().await.unwrap();

    assert_eq!(resolve_start_screen(flags), Screen::PhysicalDataEntry);
}

#[tokio::test]
async fn test_onboarded_user_starts_at_dashboard() {
    let store = Arc::new(FakeStore::with_record(&signed_in_record()).await);
    let ctx = context(FakeIdentity::signed_in(), store);

    let flags = ctx.start_flags().await.unwrap();

    assert_eq!(resolve_start_screen(flags), Screen::Dashboard);
}
