// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expiring key-value capability for verification codes.
//!
//! Backends may live outside the process (Redis, a database table with a
//! TTL column) so the store survives restarts and scales across instances.
//! Nothing in this trait assumes a particular backend; the calling layer
//! injects one.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::KeywardError;

/// Adapter for short-lived verification codes keyed by recipient.
///
/// Entries become unreadable once their ttl elapses; whether the backend
/// deletes them eagerly or lazily is its own business.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Store `code` under `key`, readable for at most `ttl`.
    ///
    /// Overwrites any existing entry for the same key, restarting its ttl.
    async fn put(&self, key: &str, code: &str, ttl: Duration) -> Result<(), KeywardError>;

    /// Fetch the code stored under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, KeywardError>;

    /// Remove the entry under `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), KeywardError>;
}
