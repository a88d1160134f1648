// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-way password hashing and constant-time verification.

use keyward_core::KeywardError;
use keyward_kdf::{KdfAlgorithm, generate_salt};
use ring::constant_time;
use tracing::debug;

use crate::credential::CredentialHash;

/// Hashes login passwords and the vault master passphrase.
///
/// Stateless; the configured algorithm only applies to newly produced
/// hashes. Verification always follows the algorithm and parameters
/// embedded in the stored hash, so old hashes keep verifying after a
/// configuration change.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    algorithm: KdfAlgorithm,
}

impl PasswordHasher {
    /// Create a hasher producing hashes under `algorithm`.
    pub fn new(algorithm: KdfAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Hash a password or passphrase under a fresh random salt.
    ///
    /// Two calls with the same plaintext produce different hashes; both
    /// verify. CPU-bound and deliberately slow -- async callers must
    /// dispatch onto a blocking worker pool.
    pub fn hash(&self, plaintext: &str) -> Result<CredentialHash, KeywardError> {
        if plaintext.is_empty() {
            return Err(KeywardError::EmptyInput);
        }
        let salt = generate_salt()?;
        let digest = self.algorithm.derive_key(plaintext.as_bytes(), &salt)?;
        Ok(CredentialHash::new(
            self.algorithm,
            salt.to_vec(),
            digest.to_vec(),
        ))
    }

    /// Verify a plaintext guess against a stored hash.
    ///
    /// Returns `false` for any mismatch, including an empty guess and a
    /// derivation failure under the stored parameters; never errors. The
    /// digest comparison is constant-time.
    pub fn verify(&self, plaintext: &str, stored: &CredentialHash) -> bool {
        if plaintext.is_empty() {
            return false;
        }
        let Ok(candidate) = stored.algorithm().derive_key(plaintext.as_bytes(), stored.salt())
        else {
            debug!("credential verify failed: stored parameters not derivable");
            return false;
        };
        constant_time::verify_slices_are_equal(candidate.as_ref(), stored.digest()).is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(KdfAlgorithm::default())
    }
}
