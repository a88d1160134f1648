// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Keyward security core.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, and miette diagnostic errors.
//!
//! # Usage
//!
//! ```no_run
//! use keyward_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("token ttl: {}s", config.token.ttl_secs);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{CodesConfig, KdfChoice, KdfConfig, KeywardConfig, TokenConfig};
pub use validation::validate_config;

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point that:
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to miette diagnostics
///
/// Returns either a valid `KeywardConfig` or a list of diagnostic errors.
pub fn load_and_validate() -> Result<KeywardConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

/// Load configuration from a specific TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<KeywardConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_complete_config_loads_and_validates() {
        let config = load_and_validate_str(
            r#"
            [token]
            secret = "0123456789abcdef0123456789abcdef"

            [kdf]
            algorithm = "pbkdf2-sha256"

            [codes]
            length = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.codes.length, 8);
        assert!(matches!(
            config.kdf.strategy(),
            keyward_kdf::KdfAlgorithm::Pbkdf2Sha256 { .. }
        ));
    }

    #[test]
    fn validation_errors_surface_through_the_entry_point() {
        // Parses fine, but the secret is too short.
        let errors = load_and_validate_str("[token]\nsecret = \"short\"").unwrap_err();
        assert!(render_errors(&errors).contains("token.secret"));
    }

    #[test]
    fn figment_errors_surface_through_the_entry_point() {
        let errors = load_and_validate_str("[token]\nttl_secs = \"soon\"").unwrap_err();
        assert!(!errors.is_empty());
    }
}
