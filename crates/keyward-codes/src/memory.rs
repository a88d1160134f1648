// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory reference backend for the code store.
//!
//! Suitable for single-process deployments and tests. Entries expire
//! lazily: an expired entry is removed the first time it is read. A
//! production deployment that must survive restarts or span instances
//! plugs an external backend into the same trait.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use keyward_core::{Clock, CodeStore, KeywardError};
use tracing::debug;

struct StoredCode {
    code: String,
    expires_at: i64,
}

/// A [`CodeStore`] backed by a process-local map.
pub struct MemoryCodeStore {
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, StoredCode>>,
}

impl MemoryCodeStore {
    /// Create an empty store reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, StoredCode>>, KeywardError> {
        self.entries
            .lock()
            .map_err(|_| KeywardError::Internal("code store lock poisoned".to_string()))
    }
}

impl std::fmt::Debug for MemoryCodeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Codes are secrets; only expose the entry count.
        let len = self.entries.lock().map(|e| e.len()).unwrap_or(0);
        f.debug_struct("MemoryCodeStore").field("entries", &len).finish()
    }
}

#[async_trait]
impl CodeStore for MemoryCodeStore {
    async fn put(&self, key: &str, code: &str, ttl: Duration) -> Result<(), KeywardError> {
        let expires_at = self.clock.now_epoch_secs() + ttl.as_secs() as i64;
        self.lock()?.insert(
            key.to_string(),
            StoredCode {
                code: code.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, KeywardError> {
        let now = self.clock.now_epoch_secs();
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) if entry.expires_at <= now => {
                // Same inclusive boundary as token expiry.
                entries.remove(key);
                debug!("verification code expired");
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.code.clone())),
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), KeywardError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
