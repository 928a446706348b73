// SPDX-License-Identifier: MIT

//! Durable local session storage.

pub mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
