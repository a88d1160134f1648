// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./keyward.toml` > `~/.config/keyward/keyward.toml`
//! > `/etc/keyward/keyward.toml` with environment variable overrides via the
//! `KEYWARD_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::KeywardConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/keyward/keyward.toml` (system-wide)
/// 3. `~/.config/keyward/keyward.toml` (user XDG config)
/// 4. `./keyward.toml` (local directory)
/// 5. `KEYWARD_*` environment variables
pub fn load_config() -> Result<KeywardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeywardConfig::default()))
        .merge(Toml::file("/etc/keyward/keyward.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("keyward/keyward.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("keyward.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<KeywardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeywardConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KeywardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeywardConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `KEYWARD_KDF_PBKDF2_ITERATIONS` must
/// map to `kdf.pbkdf2_iterations`, not `kdf.pbkdf2.iterations`.
fn env_provider() -> Env {
    Env::prefixed("KEYWARD_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("token_", "token.", 1)
            .replacen("kdf_", "kdf.", 1)
            .replacen("codes_", "codes.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use crate::model::KdfChoice;

    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.token.ttl_secs, 1800);
        assert_eq!(config.kdf.algorithm, KdfChoice::Argon2id);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [token]
            secret = "0123456789abcdef0123456789abcdef"
            ttl_secs = 600

            [kdf]
            algorithm = "pbkdf2-sha256"
            pbkdf2_iterations = 150000
            "#,
        )
        .unwrap();

        assert_eq!(config.token.ttl_secs, 600);
        assert_eq!(config.kdf.algorithm, KdfChoice::Pbkdf2Sha256);
        assert_eq!(config.kdf.pbkdf2_iterations, 150_000);
        // Untouched sections keep their defaults.
        assert_eq!(config.codes.length, 6);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = load_config_from_str(
            r#"
            [token]
            secrt = "typo"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_sections_are_rejected() {
        assert!(load_config_from_str("[sessions]\nttl = 5").is_err());
    }
}
