// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase-derived secret encryption for the Keyward security core.
//!
//! Secrets are sealed one value at a time into self-contained versioned
//! envelopes (AES-256-GCM, key derived per call from the caller-supplied
//! passphrase). Plaintext secrets are never persisted; storage only ever
//! sees the opaque envelope string.

pub mod aead;
pub mod cipher;
pub mod envelope;

pub use cipher::SecretCipher;
pub use envelope::{ENVELOPE_VERSION, SecretEnvelope};
