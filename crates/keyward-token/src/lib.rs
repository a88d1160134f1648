// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signed, expiring session tokens for the Keyward security core.
//!
//! Tokens are stateless: three base64url segments (header, claims,
//! HMAC-SHA256 signature) with validity re-derived from the bytes plus an
//! injected clock. No session table, and therefore no revocation -- the
//! calling layer may add a deny-list if it needs one.

pub mod claims;
pub mod service;

pub use claims::SessionClaims;
pub use service::{SessionToken, TokenService};
