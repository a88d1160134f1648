// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Keyward security core.

use thiserror::Error;

/// The primary error type used across all Keyward crates.
///
/// Messages never contain plaintext secrets, passphrases, or derived key
/// material.
#[derive(Debug, Error)]
pub enum KeywardError {
    /// A blank password or passphrase was submitted.
    #[error("input must not be empty")]
    EmptyInput,

    /// A stored credential hash string could not be parsed.
    #[error("malformed credential hash: {0}")]
    MalformedHash(String),

    /// A session token is structurally invalid.
    #[error("malformed session token: {0}")]
    MalformedToken(String),

    /// A secret envelope is structurally invalid (corruption or a format
    /// version this build does not understand).
    #[error("malformed secret envelope: {0}")]
    MalformedEnvelope(String),

    /// The token signature did not match the signed content.
    #[error("token signature mismatch")]
    Signature,

    /// The token's expiry time has passed.
    #[error("token expired")]
    Expired,

    /// Decryption failed. A wrong passphrase, a tampered ciphertext, and a
    /// corrupted integrity tag are deliberately indistinguishable.
    #[error("decryption failed")]
    Decryption,

    /// Key derivation was given invalid parameters or ran out of resources.
    #[error("key derivation error: {0}")]
    Kdf(String),

    /// Configuration errors (string form for cross-crate transport; rich
    /// diagnostics live in keyward-config).
    #[error("configuration error: {0}")]
    Config(String),

    /// Verification-code store backend errors.
    #[error("code store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl KeywardError {
    /// Whether this error must reach the transport layer as a bare
    /// "unauthenticated" response.
    ///
    /// Signature and expiry failures are reported identically to callers so
    /// a rejected token does not reveal why it was rejected; the reason is
    /// logged, never returned.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Signature | Self::Expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_rejections_are_uniformly_unauthenticated() {
        assert!(KeywardError::Signature.is_unauthenticated());
        assert!(KeywardError::Expired.is_unauthenticated());

        assert!(!KeywardError::Decryption.is_unauthenticated());
        assert!(!KeywardError::EmptyInput.is_unauthenticated());
        assert!(!KeywardError::MalformedToken("bad".into()).is_unauthenticated());
    }

    #[test]
    fn decryption_error_message_reveals_no_cause() {
        // Wrong passphrase and tampered ciphertext must render identically.
        assert_eq!(KeywardError::Decryption.to_string(), "decryption failed");
    }

    #[test]
    fn store_errors_carry_their_source() {
        let err = KeywardError::Store {
            source: Box::new(std::io::Error::other("backend down")),
        };
        assert!(err.to_string().contains("backend down"));
    }
}
