// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Keyward security core.
//!
//! This crate provides the shared error type, identifier types, and the
//! capability traits (time source, expiring code store) that the hashing,
//! token, and cipher crates are composed with. It holds no cryptography of
//! its own.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::KeywardError;
pub use traits::{Clock, CodeStore, ManualClock, SystemClock};
pub use types::{SecretId, UserId};
