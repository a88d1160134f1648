// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge.
//!
//! Converts Figment deserialization errors into miette diagnostics so
//! startup failures render with codes and help text instead of a bare
//! serde message.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(keyward::config::unknown_key),
        help("valid keys: {valid_keys}")
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// List of valid keys for the section.
        valid_keys: String,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(keyward::config::invalid_type))]
    InvalidType {
        /// The key with the wrong type.
        key: String,
        /// Description of the type mismatch.
        detail: String,
    },

    /// A semantic constraint failed after deserialization.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(keyward::config::validation))]
    Validation {
        /// What constraint failed and with which value.
        message: String,
    },

    /// Any other loading failure.
    #[error("{0}")]
    #[diagnostic(code(keyward::config::load))]
    Other(String),
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error may contain multiple underlying errors; each is
/// converted so the user sees everything wrong with the file at once.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let config_error = match &error.kind {
            Kind::UnknownField(field, expected) => ConfigError::UnknownKey {
                key: field.clone(),
                valid_keys: expected.to_vec().join(", "),
            },
            Kind::InvalidType(actual, expected) => {
                let key = error
                    .path
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(".");
                ConfigError::InvalidType {
                    key,
                    detail: format!("found {actual}, expected {expected}"),
                }
            }
            _ => ConfigError::Other(format!("{error}")),
        };

        errors.push(config_error);
    }

    errors
}

/// Render a list of config errors as a plain multi-line string.
///
/// For callers without a miette report handler installed (tests, log
/// output); each error gets one line.
pub fn render_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_error_lists_valid_keys() {
        let err = crate::loader::load_config_from_str("[token]\nsecrt = \"x\"").unwrap_err();
        let errors = figment_to_config_errors(err);
        assert!(!errors.is_empty());
        let rendered = render_errors(&errors);
        assert!(rendered.contains("secrt"));
    }

    #[test]
    fn type_mismatch_error_names_the_key() {
        let err = crate::loader::load_config_from_str("[token]\nttl_secs = \"soon\"").unwrap_err();
        let errors = figment_to_config_errors(err);
        let rendered = render_errors(&errors);
        assert!(rendered.contains("ttl_secs") || rendered.contains("string"));
    }
}
