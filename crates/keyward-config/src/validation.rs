// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: minimum secret length, KDF cost floors, code length bounds.

use crate::diagnostic::ConfigError;
use crate::model::KeywardConfig;

/// Minimum signing secret length in bytes.
const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &KeywardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // The signing secret must be set explicitly and long enough for
    // HMAC-SHA256 to be meaningful.
    if config.token.secret.len() < MIN_TOKEN_SECRET_LEN {
        errors.push(ConfigError::Validation {
            message: format!(
                "token.secret must be at least {MIN_TOKEN_SECRET_LEN} bytes, got {}",
                config.token.secret.len()
            ),
        });
    }

    if config.token.ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "token.ttl_secs must be positive".to_string(),
        });
    }

    // KDF cost floors: values below these make offline guessing cheap.
    if config.kdf.pbkdf2_iterations < 100_000 {
        errors.push(ConfigError::Validation {
            message: format!(
                "kdf.pbkdf2_iterations must be at least 100000, got {}",
                config.kdf.pbkdf2_iterations
            ),
        });
    }

    if config.kdf.pbkdf2_iterations > keyward_kdf::MAX_PBKDF2_ITERATIONS {
        errors.push(ConfigError::Validation {
            message: format!(
                "kdf.pbkdf2_iterations must be at most {}, got {}",
                keyward_kdf::MAX_PBKDF2_ITERATIONS,
                config.kdf.pbkdf2_iterations
            ),
        });
    }

    if config.kdf.argon2_memory_cost < 32_768 {
        errors.push(ConfigError::Validation {
            message: format!(
                "kdf.argon2_memory_cost must be at least 32768 (32 MiB), got {}",
                config.kdf.argon2_memory_cost
            ),
        });
    }

    if config.kdf.argon2_iterations < 2 {
        errors.push(ConfigError::Validation {
            message: format!(
                "kdf.argon2_iterations must be at least 2, got {}",
                config.kdf.argon2_iterations
            ),
        });
    }

    if config.kdf.argon2_parallelism < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "kdf.argon2_parallelism must be at least 1, got {}",
                config.kdf.argon2_parallelism
            ),
        });
    }

    if config.codes.ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "codes.ttl_secs must be positive".to_string(),
        });
    }

    if !(4..=10).contains(&config.codes.length) {
        errors.push(ConfigError::Validation {
            message: format!(
                "codes.length must be between 4 and 10, got {}",
                config.codes.length
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
