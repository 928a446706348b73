// SPDX-License-Identifier: MIT

//! Session persistence backends.
//!
//! The store holds exactly two things: the [`SessionRecord`] for the signed-in
//! account, and the one-time intro-seen flag. The flag is device-local and
//! survives `clear()`; the record does not.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex as StdMutex;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::SessionRecord;

/// Durable key-value persistence for session state.
///
/// Writes serialize through the implementation; callers never coordinate.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<SessionRecord>>;
    async fn save(&self, record: &SessionRecord) -> Result<()>;
    /// Remove the session record. The intro flag is untouched.
    async fn clear(&self) -> Result<()>;
    async fn intro_seen(&self) -> Result<bool>;
    async fn set_intro_seen(&self) -> Result<()>;
}

/// On-disk document layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    intro_seen: bool,
    #[serde(default)]
    session: Option<SessionRecord>,
}

/// File-backed store: one JSON document, written atomically via a temp file
/// and rename. A single internal mutex serializes writers.
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_document(&self) -> Result<StoreDocument> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| AppError::Storage(format!("corrupt session file: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreDocument::default()),
            Err(e) => Err(AppError::Storage(e.to_string())),
        }
    }

    async fn write_document(&self, doc: &StoreDocument) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(doc)
            .map_err(|e| AppError::Storage(format!("serialize session file: {}", e)))?;

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn update<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut StoreDocument) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;
        mutate(&mut doc);
        self.write_document(&doc).await
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<SessionRecord>> {
        Ok(self.read_document().await?.session)
    }

    async fn save(&self, record: &SessionRecord) -> Result<()> {
        let record = record.clone();
        self.update(move |doc| doc.session = Some(record)).await?;
        tracing::debug!(path = %self.path.display(), "Session record saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.update(|doc| doc.session = None).await?;
        tracing::info!(path = %self.path.display(), "Session record cleared");
        Ok(())
    }

    async fn intro_seen(&self) -> Result<bool> {
        Ok(self.read_document().await?.intro_seen)
    }

    async fn set_intro_seen(&self) -> Result<()> {
        self.update(|doc| doc.intro_seen = true).await
    }
}

/// In-memory store for tests and the simulator harness.
#[derive(Default)]
pub struct MemorySessionStore {
    state: StdMutex<(bool, Option<SessionRecord>)>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<SessionRecord>> {
        Ok(self.state.lock().unwrap().1.clone())
    }

    async fn save(&self, record: &SessionRecord) -> Result<()> {
        self.state.lock().unwrap().1 = Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.state.lock().unwrap().1 = None;
        Ok(())
    }

    async fn intro_seen(&self) -> Result<bool> {
        Ok(self.state.lock().unwrap().0)
    }

    async fn set_intro_seen(&self) -> Result<()> {
        self.state.lock().unwrap().0 = true;
        Ok(())
    }
}
