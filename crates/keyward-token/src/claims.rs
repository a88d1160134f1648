// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session claims carried inside a signed token.

use serde::{Deserialize, Serialize};

/// The claims a session token asserts about its holder.
///
/// Immutable once issued; validity is re-derived entirely from the signed
/// token bytes plus the current time. There is no server-side session
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the username.
    pub sub: String,
    /// The account identifier.
    pub user_id: String,
    /// Issued-at, epoch seconds.
    pub iat: i64,
    /// Expires-at, epoch seconds. The token is invalid from this instant on.
    pub exp: i64,
}
