// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The versioned secret envelope.
//!
//! One envelope per secret field, independently encrypted; re-encryption
//! replaces the whole envelope. Wire form is base64url (no padding) of:
//!
//! ```text
//! version(1) || kdf-code(1) || kdf-params(3 x u32 BE) || salt(16)
//!            || nonce(12) || created-at(i64 BE) || ciphertext || tag(16)
//! ```
//!
//! The KDF descriptor and the per-secret salt travel inside the envelope,
//! so decryption needs nothing but the envelope and the passphrase, and
//! old envelopes stay decryptable after the configured default algorithm
//! changes. The leading version byte gates future layout changes.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use keyward_core::KeywardError;
use keyward_kdf::{KdfAlgorithm, SALT_LEN};

use crate::aead::{NONCE_LEN, TAG_LEN};

/// Current envelope format version.
pub const ENVELOPE_VERSION: u8 = 1;

/// Fixed byte length of everything before the ciphertext.
const HEADER_LEN: usize = 1 + 1 + 12 + SALT_LEN + NONCE_LEN + 8;

/// Smallest structurally valid envelope: header plus a bare tag.
const MIN_LEN: usize = HEADER_LEN + TAG_LEN;

/// A parsed secret envelope.
///
/// Opaque to storage; parse→reserialize round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretEnvelope {
    algorithm: KdfAlgorithm,
    salt: [u8; SALT_LEN],
    nonce: [u8; NONCE_LEN],
    created_at: i64,
    /// Ciphertext with the 16-byte GCM tag appended.
    ciphertext: Vec<u8>,
}

impl SecretEnvelope {
    pub(crate) fn new(
        algorithm: KdfAlgorithm,
        salt: [u8; SALT_LEN],
        nonce: [u8; NONCE_LEN],
        created_at: i64,
        ciphertext: Vec<u8>,
    ) -> Self {
        Self {
            algorithm,
            salt,
            nonce,
            created_at,
            ciphertext,
        }
    }

    /// The KDF recorded when this envelope was sealed.
    pub fn algorithm(&self) -> KdfAlgorithm {
        self.algorithm
    }

    /// The per-secret random salt.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub(crate) fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    /// Seal time, epoch seconds.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub(crate) fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub(crate) fn aad(&self) -> Vec<u8> {
        aad_bytes(self.algorithm, &self.salt, self.created_at)
    }
}

/// Header fields bound into the AEAD tag as associated data: everything
/// except the nonce, which GCM authenticates on its own. Flipping any
/// header bit therefore fails decryption, including the timestamp.
pub(crate) fn aad_bytes(
    algorithm: KdfAlgorithm,
    salt: &[u8; SALT_LEN],
    created_at: i64,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN - NONCE_LEN);
    bytes.push(ENVELOPE_VERSION);
    bytes.push(algorithm.wire_code());
    for param in algorithm.wire_params() {
        bytes.extend_from_slice(&param.to_be_bytes());
    }
    bytes.extend_from_slice(salt);
    bytes.extend_from_slice(&created_at.to_be_bytes());
    bytes
}

impl fmt::Display for SecretEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        bytes.push(ENVELOPE_VERSION);
        bytes.push(self.algorithm.wire_code());
        for param in self.algorithm.wire_params() {
            bytes.extend_from_slice(&param.to_be_bytes());
        }
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.created_at.to_be_bytes());
        bytes.extend_from_slice(&self.ciphertext);
        f.write_str(&URL_SAFE_NO_PAD.encode(bytes))
    }
}

impl FromStr for SecretEnvelope {
    type Err = KeywardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = URL_SAFE_NO_PAD.decode(s).map_err(|_| {
            KeywardError::MalformedEnvelope("not valid base64url".to_string())
        })?;
        if bytes.len() < MIN_LEN {
            return Err(KeywardError::MalformedEnvelope(format!(
                "too short: {} bytes, need at least {MIN_LEN}",
                bytes.len()
            )));
        }

        let version = bytes[0];
        if version != ENVELOPE_VERSION {
            return Err(KeywardError::MalformedEnvelope(format!(
                "unsupported version {version}"
            )));
        }

        let kdf_code = bytes[1];
        let mut params = [0u32; 3];
        for (i, chunk) in bytes[2..14].chunks_exact(4).enumerate() {
            params[i] = u32::from_be_bytes(chunk.try_into().expect("chunk is 4 bytes"));
        }
        let algorithm = KdfAlgorithm::from_wire(kdf_code, params)
            .map_err(|e| KeywardError::MalformedEnvelope(e.to_string()))?;

        let mut offset = 14;
        let salt: [u8; SALT_LEN] = bytes[offset..offset + SALT_LEN]
            .try_into()
            .expect("length checked above");
        offset += SALT_LEN;
        let nonce: [u8; NONCE_LEN] = bytes[offset..offset + NONCE_LEN]
            .try_into()
            .expect("length checked above");
        offset += NONCE_LEN;
        let created_at = i64::from_be_bytes(
            bytes[offset..offset + 8]
                .try_into()
                .expect("length checked above"),
        );
        offset += 8;
        let ciphertext = bytes[offset..].to_vec();

        Ok(Self {
            algorithm,
            salt,
            nonce,
            created_at,
            ciphertext,
        })
    }
}
