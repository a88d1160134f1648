// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase-driven encryption and decryption of individual secrets.
//!
//! The passphrase arrives with every call and is never cached; the derived
//! key lives only for the duration of the operation and is wiped on drop.
//! Each envelope gets its own random salt, so two users with the same
//! passphrase still derive different keys.

use std::sync::Arc;

use keyward_core::{Clock, KeywardError};
use keyward_kdf::{KdfAlgorithm, generate_salt};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::aead;
use crate::envelope::{self, SecretEnvelope};

/// Encrypts and decrypts single secret values under a per-request
/// passphrase.
///
/// Stateless and reentrant. The configured algorithm applies only to newly
/// sealed envelopes; decryption always follows the KDF descriptor recorded
/// in the envelope.
pub struct SecretCipher {
    algorithm: KdfAlgorithm,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SecretCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretCipher")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl SecretCipher {
    /// Create a cipher sealing new envelopes under `algorithm`.
    pub fn new(algorithm: KdfAlgorithm, clock: Arc<dyn Clock>) -> Self {
        Self { algorithm, clock }
    }

    /// Encrypt one plaintext secret value into a fresh envelope.
    ///
    /// Generates a new random salt and nonce per call; encrypting the same
    /// value twice never yields the same envelope. CPU-bound and
    /// deliberately slow -- async callers must dispatch onto a blocking
    /// worker pool.
    pub fn encrypt(
        &self,
        plaintext: &str,
        passphrase: &SecretString,
    ) -> Result<SecretEnvelope, KeywardError> {
        if passphrase.expose_secret().is_empty() {
            return Err(KeywardError::EmptyInput);
        }

        let salt = generate_salt()?;
        let key = self
            .algorithm
            .derive_key(passphrase.expose_secret().as_bytes(), &salt)?;

        // The header is bound into the tag, so tampering with the stored
        // metadata fails decryption just like tampering with the ciphertext.
        let created_at = self.clock.now_epoch_secs();
        let aad = envelope::aad_bytes(self.algorithm, &salt, created_at);
        let (ciphertext, nonce) = aead::seal(&key, &aad, plaintext.as_bytes())?;

        Ok(SecretEnvelope::new(
            self.algorithm,
            salt,
            nonce,
            created_at,
            ciphertext,
        ))
    }

    /// Decrypt an envelope with the supplied passphrase.
    ///
    /// The key is re-derived from the salt and KDF descriptor recorded in
    /// the envelope; the integrity tag is verified before any plaintext is
    /// released. A wrong passphrase, a flipped ciphertext bit, and a
    /// corrupted tag all fail with the same uniform
    /// [`KeywardError::Decryption`].
    pub fn decrypt(
        &self,
        envelope: &SecretEnvelope,
        passphrase: &SecretString,
    ) -> Result<String, KeywardError> {
        let key = envelope
            .algorithm()
            .derive_key(passphrase.expose_secret().as_bytes(), envelope.salt())?;

        let plaintext = aead::open(&key, envelope.nonce(), &envelope.aad(), envelope.ciphertext())
            .inspect_err(|_| {
                debug!("envelope decryption failed");
            })?;

        String::from_utf8(plaintext).map_err(|_| KeywardError::Decryption)
    }
}

#[cfg(test)]
mod tests {
    use keyward_core::ManualClock;

    use super::*;

    // Low-cost parameters so tests stay fast.
    fn cipher() -> SecretCipher {
        SecretCipher::new(
            KdfAlgorithm::Pbkdf2Sha256 { iterations: 1_000 },
            Arc::new(ManualClock::new(1_700_000_000)),
        )
    }

    fn passphrase(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let c = cipher();
        let envelope = c.encrypt("db-password-123", &passphrase("masterpass")).unwrap();
        let plaintext = c.decrypt(&envelope, &passphrase("masterpass")).unwrap();
        assert_eq!(plaintext, "db-password-123");
    }

    #[test]
    fn wrong_passphrase_is_uniform_decryption_failure() {
        let c = cipher();
        let envelope = c.encrypt("db-password-123", &passphrase("masterpass")).unwrap();
        let err = c.decrypt(&envelope, &passphrase("wrongpass")).unwrap_err();
        assert!(matches!(err, KeywardError::Decryption));
    }

    #[test]
    fn empty_passphrase_is_rejected_on_encrypt() {
        let err = cipher().encrypt("secret", &passphrase("")).unwrap_err();
        assert!(matches!(err, KeywardError::EmptyInput));
    }

    #[test]
    fn same_secret_seals_to_different_envelopes() {
        let c = cipher();
        let m = passphrase("masterpass");
        let e1 = c.encrypt("same value", &m).unwrap();
        let e2 = c.encrypt("same value", &m).unwrap();

        // Fresh salt and nonce per envelope.
        assert_ne!(e1.salt(), e2.salt());
        assert_ne!(e1.to_string(), e2.to_string());

        assert_eq!(c.decrypt(&e1, &m).unwrap(), "same value");
        assert_eq!(c.decrypt(&e2, &m).unwrap(), "same value");
    }

    #[test]
    fn decrypt_follows_the_envelope_kdf_not_the_configured_one() {
        let argon = SecretCipher::new(
            KdfAlgorithm::Argon2id {
                memory_cost_kib: 32_768,
                iterations: 2,
                parallelism: 1,
            },
            Arc::new(ManualClock::new(0)),
        );
        let envelope = argon.encrypt("migrate-me", &passphrase("m")).unwrap();

        // A cipher configured for PBKDF2 still opens the Argon2id envelope.
        assert_eq!(cipher().decrypt(&envelope, &passphrase("m")).unwrap(), "migrate-me");
    }

    #[test]
    fn envelope_records_the_seal_time() {
        let clock = Arc::new(ManualClock::new(1_234_567));
        let c = SecretCipher::new(
            KdfAlgorithm::Pbkdf2Sha256 { iterations: 1_000 },
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        let envelope = c.encrypt("s", &passphrase("m")).unwrap();
        assert_eq!(envelope.created_at(), 1_234_567);
    }

    #[test]
    fn empty_plaintext_round_trips() {
        // An empty secret value is legal; only the passphrase must be
        // nonempty.
        let c = cipher();
        let envelope = c.encrypt("", &passphrase("m")).unwrap();
        assert_eq!(c.decrypt(&envelope, &passphrase("m")).unwrap(), "");
    }
}
