//! Guest store module
//!
//! Reads the guest list from its JSON backing file. There is no cache: every
//! call re-reads and re-parses the file, so edits show up on the next request.

use hyper::body::Bytes;
use serde::de::IgnoredAny;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors raised while loading the guest list
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file is missing or unreadable
    #[error("failed to read guest list: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON array
    #[error("guest list is not a JSON array: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Read-only access to the guest list file
#[derive(Debug, Clone)]
pub struct GuestStore {
    path: PathBuf,
}

impl GuestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole guest list
    ///
    /// Returns the file bytes verbatim once they are known to hold a JSON
    /// array.
    pub async fn load_all(&self) -> Result<Bytes, StoreError> {
        let raw = fs::read(&self.path).await?;
        serde_json::from_slice::<Vec<IgnoredAny>>(&raw)?;
        Ok(Bytes::from(raw))
    }

    /// Load the guest at a zero-based position
    ///
    /// `Ok(None)` means the list was read fine but has no such element.
    pub async fn load_at(&self, index: usize) -> Result<Option<Value>, StoreError> {
        let raw = fs::read(&self.path).await?;
        let mut guests: Vec<Value> = serde_json::from_slice(&raw)?;
        if index < guests.len() {
            Ok(Some(guests.swap_remove(index)))
        } else {
            Ok(None)
        }
    }
}
