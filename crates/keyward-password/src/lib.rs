// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-way credential hashing for the Keyward security core.
//!
//! Hashes are self-describing strings
//! (`<algorithm-tag>$<params>$<salt>$<digest>`) so verification never
//! depends on current configuration and algorithm migration never breaks
//! stored credentials.

pub mod credential;
pub mod hasher;

pub use credential::CredentialHash;
pub use hasher::PasswordHasher;
