// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token issuance and verification.
//!
//! A token is three base64url segments (header, claims, signature) joined
//! by dots; the signature is HMAC-SHA256 over `header "." claims` with the
//! server-held secret. Verification order is structure, then signature,
//! then expiry -- claims are never trusted before the MAC checks out.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use keyward_core::{Clock, KeywardError};
use ring::hmac;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::claims::SessionClaims;

/// The only signing algorithm this service produces or accepts.
const ALG: &str = "HS256";
const TYP: &str = "JWT";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// A self-contained signed session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    /// The token in its wire form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionToken {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Structural validation happens in `verify`; the wrapper is opaque.
        Ok(Self(s.to_string()))
    }
}

/// Issues and verifies signed, expiring session tokens.
///
/// Stateless and reentrant; the signing key and the clock are the only
/// configuration, loaded once at process start. Tokens are not revocable
/// in this design -- there is no server-side session table.
pub struct TokenService {
    key: hmac::Key,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl TokenService {
    /// Create a service signing with `secret` and reading time from `clock`.
    pub fn new(secret: &SecretString, clock: Arc<dyn Clock>) -> Self {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret.expose_secret().as_bytes());
        Self { key, clock }
    }

    /// Issue a token for `sub`/`user_id` valid for `ttl` from now.
    pub fn issue(
        &self,
        sub: &str,
        user_id: &str,
        ttl: Duration,
    ) -> Result<SessionToken, KeywardError> {
        let iat = self.clock.now_epoch_secs();
        let claims = SessionClaims {
            sub: sub.to_string(),
            user_id: user_id.to_string(),
            iat,
            exp: iat + ttl.as_secs() as i64,
        };

        let header = Header {
            alg: ALG.to_string(),
            typ: TYP.to_string(),
        };
        let header_b64 = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&header)
                .map_err(|e| KeywardError::Internal(format!("unserializable header: {e}")))?,
        );
        let claims_b64 = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&claims)
                .map_err(|e| KeywardError::Internal(format!("unserializable claims: {e}")))?,
        );

        let signing_input = format!("{header_b64}.{claims_b64}");
        let signature = hmac::sign(&self.key, signing_input.as_bytes());
        let signature_b64 = URL_SAFE_NO_PAD.encode(signature.as_ref());

        Ok(SessionToken(format!("{signing_input}.{signature_b64}")))
    }

    /// Verify a token and return its claims.
    ///
    /// Fails `MalformedToken` when the structure cannot be parsed,
    /// `Signature` when the MAC mismatches (constant-time compare), and
    /// `Expired` when `exp <= now`. Signature and expiry rejections must
    /// reach the wire as a uniform "unauthenticated"; the distinction
    /// below is log-only.
    pub fn verify(&self, token: &SessionToken) -> Result<SessionClaims, KeywardError> {
        let parts: Vec<&str> = token.0.split('.').collect();
        let [header_b64, claims_b64, signature_b64] = parts.as_slice() else {
            return Err(KeywardError::MalformedToken(
                "expected three dot-separated segments".to_string(),
            ));
        };

        let header_bytes = URL_SAFE_NO_PAD.decode(header_b64).map_err(|_| {
            KeywardError::MalformedToken("header is not valid base64url".to_string())
        })?;
        let claims_bytes = URL_SAFE_NO_PAD.decode(claims_b64).map_err(|_| {
            KeywardError::MalformedToken("claims are not valid base64url".to_string())
        })?;
        let signature = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|_| {
            KeywardError::MalformedToken("signature is not valid base64url".to_string())
        })?;

        // MAC first: nothing inside the token is trusted until it verifies.
        let signing_input = format!("{header_b64}.{claims_b64}");
        hmac::verify(&self.key, signing_input.as_bytes(), &signature).map_err(|_| {
            debug!("token rejected: signature mismatch");
            KeywardError::Signature
        })?;

        let header: Header = serde_json::from_slice(&header_bytes)
            .map_err(|e| KeywardError::MalformedToken(format!("invalid header: {e}")))?;
        if header.alg != ALG {
            return Err(KeywardError::MalformedToken(format!(
                "unsupported algorithm `{}`",
                header.alg
            )));
        }

        let claims: SessionClaims = serde_json::from_slice(&claims_bytes)
            .map_err(|e| KeywardError::MalformedToken(format!("invalid claims: {e}")))?;

        if claims.exp <= self.clock.now_epoch_secs() {
            debug!(sub = %claims.sub, "token rejected: expired");
            return Err(KeywardError::Expired);
        }

        Ok(claims)
    }
}
