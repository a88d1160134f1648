// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Keyward security core.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use keyward_kdf::KdfAlgorithm;

/// Top-level Keyward configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections default; validation decides what must
/// be explicitly set (the token secret, notably).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeywardConfig {
    /// Session token signing settings.
    #[serde(default)]
    pub token: TokenConfig,

    /// Key derivation settings for hashing and secret encryption.
    #[serde(default)]
    pub kdf: KdfConfig,

    /// Verification code settings.
    #[serde(default)]
    pub codes: CodesConfig,
}

/// Session token signing settings.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenConfig {
    /// HMAC-SHA256 signing secret. No usable default: validation rejects
    /// anything under 32 bytes, so deployments must set it explicitly.
    #[serde(default)]
    pub secret: String,

    /// Token time-to-live in seconds (default: 1800 = 30 minutes).
    #[serde(default = "default_token_ttl_secs")]
    pub ttl_secs: u64,
}

impl TokenConfig {
    /// The signing secret, wrapped for handoff to the token service.
    pub fn signing_secret(&self) -> SecretString {
        SecretString::from(self.secret.clone())
    }

    /// The configured ttl as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            ttl_secs: default_token_ttl_secs(),
        }
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

/// Which KDF newly produced hashes and envelopes use.
///
/// Stored data is unaffected by this choice; it always records the
/// algorithm it was produced under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KdfChoice {
    Argon2id,
    Pbkdf2Sha256,
}

/// Key derivation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KdfConfig {
    /// Algorithm for new hashes and envelopes (default: argon2id).
    #[serde(default = "default_kdf_choice")]
    pub algorithm: KdfChoice,

    /// PBKDF2-HMAC-SHA256 iteration count (default: 600000).
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,

    /// Argon2id memory cost in KiB (default: 65536 = 64 MiB).
    #[serde(default = "default_argon2_memory_cost")]
    pub argon2_memory_cost: u32,

    /// Argon2id iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2id parallelism lanes (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

impl KdfConfig {
    /// Build the strategy the hasher and cipher are constructed with.
    pub fn strategy(&self) -> KdfAlgorithm {
        match self.algorithm {
            KdfChoice::Pbkdf2Sha256 => KdfAlgorithm::Pbkdf2Sha256 {
                iterations: self.pbkdf2_iterations,
            },
            KdfChoice::Argon2id => KdfAlgorithm::Argon2id {
                memory_cost_kib: self.argon2_memory_cost,
                iterations: self.argon2_iterations,
                parallelism: self.argon2_parallelism,
            },
        }
    }
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            algorithm: default_kdf_choice(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
            argon2_memory_cost: default_argon2_memory_cost(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

/// Verification code settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CodesConfig {
    /// Code time-to-live in seconds (default: 900 = 15 minutes).
    #[serde(default = "default_codes_ttl_secs")]
    pub ttl_secs: u64,

    /// Number of decimal digits per code (default: 6).
    #[serde(default = "default_codes_length")]
    pub length: usize,
}

impl CodesConfig {
    /// The configured ttl as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CodesConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_codes_ttl_secs(),
            length: default_codes_length(),
        }
    }
}

fn default_token_ttl_secs() -> u64 {
    1800 // 30 minutes
}

fn default_kdf_choice() -> KdfChoice {
    KdfChoice::Argon2id
}

fn default_pbkdf2_iterations() -> u32 {
    keyward_kdf::DEFAULT_PBKDF2_ITERATIONS
}

fn default_argon2_memory_cost() -> u32 {
    keyward_kdf::DEFAULT_ARGON2_MEMORY_COST
}

fn default_argon2_iterations() -> u32 {
    keyward_kdf::DEFAULT_ARGON2_ITERATIONS
}

fn default_argon2_parallelism() -> u32 {
    keyward_kdf::DEFAULT_ARGON2_PARALLELISM
}

fn default_codes_ttl_secs() -> u64 {
    900 // 15 minutes
}

fn default_codes_length() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_documented_values() {
        let config = KeywardConfig::default();
        assert_eq!(config.token.ttl_secs, 1800);
        assert_eq!(config.kdf.algorithm, KdfChoice::Argon2id);
        assert_eq!(config.kdf.pbkdf2_iterations, 600_000);
        assert_eq!(config.codes.ttl_secs, 900);
        assert_eq!(config.codes.length, 6);
    }

    #[test]
    fn kdf_config_builds_the_selected_strategy() {
        let mut config = KdfConfig::default();
        assert!(matches!(
            config.strategy(),
            KdfAlgorithm::Argon2id {
                memory_cost_kib: 65_536,
                iterations: 3,
                parallelism: 4,
            }
        ));

        config.algorithm = KdfChoice::Pbkdf2Sha256;
        assert!(matches!(
            config.strategy(),
            KdfAlgorithm::Pbkdf2Sha256 {
                iterations: 600_000
            }
        ));
    }

    #[test]
    fn token_secret_is_redacted_from_debug_output() {
        let config = TokenConfig {
            secret: "super-secret-signing-key-material".into(),
            ttl_secs: 1800,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
