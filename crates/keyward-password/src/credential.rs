// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The self-describing credential hash string.
//!
//! Encoding: `<algorithm-tag>$<params>$<base64url salt>$<base64url digest>`,
//! base64url without padding. Every field a verifier needs travels inside
//! the string, so stored hashes keep verifying after the configured default
//! algorithm changes.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use keyward_core::KeywardError;
use keyward_kdf::{KEY_LEN, KdfAlgorithm};

/// A parsed credential hash.
///
/// Produced once per password/passphrase set and replaced wholesale when
/// the user changes that secret. Parse→reserialize round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialHash {
    algorithm: KdfAlgorithm,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl CredentialHash {
    pub(crate) fn new(algorithm: KdfAlgorithm, salt: Vec<u8>, digest: Vec<u8>) -> Self {
        Self {
            algorithm,
            salt,
            digest,
        }
    }

    /// The algorithm (and cost parameters) this hash was produced under.
    pub fn algorithm(&self) -> KdfAlgorithm {
        self.algorithm
    }

    /// The random salt generated when the hash was produced.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// The derived digest.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }
}

impl fmt::Display for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}${}${}${}",
            self.algorithm.tag(),
            self.algorithm.params_string(),
            URL_SAFE_NO_PAD.encode(&self.salt),
            URL_SAFE_NO_PAD.encode(&self.digest)
        )
    }
}

impl FromStr for CredentialHash {
    type Err = KeywardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('$').collect();
        let [tag, params, salt_b64, digest_b64] = parts.as_slice() else {
            return Err(KeywardError::MalformedHash(
                "expected four dollar-separated fields".to_string(),
            ));
        };

        let algorithm = KdfAlgorithm::from_tag_and_params(tag, params)
            .map_err(|e| KeywardError::MalformedHash(e.to_string()))?;

        let salt = URL_SAFE_NO_PAD
            .decode(salt_b64)
            .map_err(|_| KeywardError::MalformedHash("salt is not valid base64url".to_string()))?;
        if salt.is_empty() {
            return Err(KeywardError::MalformedHash("salt is empty".to_string()));
        }

        let digest = URL_SAFE_NO_PAD.decode(digest_b64).map_err(|_| {
            KeywardError::MalformedHash("digest is not valid base64url".to_string())
        })?;
        if digest.len() != KEY_LEN {
            return Err(KeywardError::MalformedHash(format!(
                "digest must be {KEY_LEN} bytes, got {}",
                digest.len()
            )));
        }

        Ok(Self {
            algorithm,
            salt,
            digest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CredentialHash {
        CredentialHash::new(
            KdfAlgorithm::Pbkdf2Sha256 { iterations: 1_000 },
            vec![7u8; 16],
            vec![9u8; KEY_LEN],
        )
    }

    #[test]
    fn render_parse_round_trips_unchanged() {
        let rendered = sample().to_string();
        let parsed: CredentialHash = rendered.parse().unwrap();
        assert_eq!(parsed, sample());
        assert_eq!(parsed.to_string(), rendered);
    }

    #[test]
    fn argon2id_hash_string_round_trips() {
        let hash = CredentialHash::new(
            KdfAlgorithm::Argon2id {
                memory_cost_kib: 65_536,
                iterations: 3,
                parallelism: 4,
            },
            vec![1u8; 16],
            vec![2u8; KEY_LEN],
        );
        let rendered = hash.to_string();
        assert!(rendered.starts_with("argon2id$m=65536,t=3,p=4$"));
        let parsed: CredentialHash = rendered.parse().unwrap();
        assert_eq!(parsed.to_string(), rendered);
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let err = "pbkdf2-sha256$1000$c2FsdA".parse::<CredentialHash>().unwrap_err();
        assert!(matches!(err, KeywardError::MalformedHash(_)));
    }

    #[test]
    fn unknown_algorithm_is_malformed() {
        let rendered = sample().to_string().replace("pbkdf2-sha256", "md5");
        let err = rendered.parse::<CredentialHash>().unwrap_err();
        assert!(matches!(err, KeywardError::MalformedHash(_)));
    }

    #[test]
    fn bad_base64_is_malformed() {
        let rendered = format!("pbkdf2-sha256$1000$!!!${}", URL_SAFE_NO_PAD.encode([0u8; KEY_LEN]));
        let err = rendered.parse::<CredentialHash>().unwrap_err();
        assert!(matches!(err, KeywardError::MalformedHash(_)));
    }

    #[test]
    fn short_digest_is_malformed() {
        let rendered = format!(
            "pbkdf2-sha256$1000${}${}",
            URL_SAFE_NO_PAD.encode([7u8; 16]),
            URL_SAFE_NO_PAD.encode([9u8; 8])
        );
        let err = rendered.parse::<CredentialHash>().unwrap_err();
        assert!(matches!(err, KeywardError::MalformedHash(_)));
    }
}
