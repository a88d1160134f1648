// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pluggable key derivation shared by password hashing and secret
//! encryption.
//!
//! Both stored encodings (credential hashes, secret envelopes) record the
//! algorithm and its cost parameters next to the derived output, so the
//! configured default can migrate without breaking data derived under the
//! old one. Derived keys come back wrapped in [`Zeroizing`] and are wiped
//! on drop.

use std::num::NonZeroU32;

use keyward_core::KeywardError;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

/// Length in bytes of every derived key and password digest.
pub const KEY_LEN: usize = 32;

/// Length in bytes of the random salt fed to either algorithm.
pub const SALT_LEN: usize = 16;

/// Default PBKDF2-HMAC-SHA256 iteration count (OWASP 2023 recommendation).
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 600_000;

/// Default Argon2id memory cost in KiB (64 MiB).
pub const DEFAULT_ARGON2_MEMORY_COST: u32 = 65_536;

/// Default Argon2id iteration count.
pub const DEFAULT_ARGON2_ITERATIONS: u32 = 3;

/// Default Argon2id parallelism lanes.
pub const DEFAULT_ARGON2_PARALLELISM: u32 = 4;

/// Upper bounds accepted when reconstructing an algorithm from stored
/// data. Parameters beyond these are treated as corruption rather than
/// honored, which also bounds the work a crafted envelope can demand.
pub const MAX_PBKDF2_ITERATIONS: u32 = 10_000_000;
pub const MAX_ARGON2_MEMORY_COST: u32 = 4_194_304; // 4 GiB in KiB
pub const MAX_ARGON2_ITERATIONS: u32 = 64;
pub const MAX_ARGON2_PARALLELISM: u32 = 64;

/// Key derivation strategy.
///
/// The variant and its cost parameters travel with every derived output,
/// embedded as a text tag in credential hashes and as a wire code in
/// secret envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfAlgorithm {
    /// PBKDF2 with HMAC-SHA256.
    Pbkdf2Sha256 { iterations: u32 },
    /// Argon2id, version 0x13.
    Argon2id {
        memory_cost_kib: u32,
        iterations: u32,
        parallelism: u32,
    },
}

impl Default for KdfAlgorithm {
    fn default() -> Self {
        Self::Argon2id {
            memory_cost_kib: DEFAULT_ARGON2_MEMORY_COST,
            iterations: DEFAULT_ARGON2_ITERATIONS,
            parallelism: DEFAULT_ARGON2_PARALLELISM,
        }
    }
}

impl KdfAlgorithm {
    /// Stable text tag recorded in credential hash strings.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pbkdf2Sha256 { .. } => "pbkdf2-sha256",
            Self::Argon2id { .. } => "argon2id",
        }
    }

    /// Cost parameters rendered for the credential hash string.
    ///
    /// PBKDF2 renders its bare iteration count; Argon2id renders
    /// `m=<KiB>,t=<iters>,p=<lanes>`.
    pub fn params_string(&self) -> String {
        match self {
            Self::Pbkdf2Sha256 { iterations } => iterations.to_string(),
            Self::Argon2id {
                memory_cost_kib,
                iterations,
                parallelism,
            } => format!("m={memory_cost_kib},t={iterations},p={parallelism}"),
        }
    }

    /// Reconstruct an algorithm from a hash string's tag and params fields.
    pub fn from_tag_and_params(tag: &str, params: &str) -> Result<Self, KeywardError> {
        match tag {
            "pbkdf2-sha256" => {
                let iterations = params
                    .parse::<u32>()
                    .map_err(|_| KeywardError::Kdf(format!("invalid pbkdf2 params `{params}`")))?;
                Self::Pbkdf2Sha256 { iterations }.validated()
            }
            "argon2id" => {
                let mut memory_cost_kib = None;
                let mut iterations = None;
                let mut parallelism = None;
                for part in params.split(',') {
                    let (name, value) = part.split_once('=').ok_or_else(|| {
                        KeywardError::Kdf(format!("invalid argon2id params `{params}`"))
                    })?;
                    let value = value.parse::<u32>().map_err(|_| {
                        KeywardError::Kdf(format!("invalid argon2id params `{params}`"))
                    })?;
                    match name {
                        "m" => memory_cost_kib = Some(value),
                        "t" => iterations = Some(value),
                        "p" => parallelism = Some(value),
                        _ => {
                            return Err(KeywardError::Kdf(format!(
                                "unknown argon2id param `{name}`"
                            )));
                        }
                    }
                }
                match (memory_cost_kib, iterations, parallelism) {
                    (Some(m), Some(t), Some(p)) => Self::Argon2id {
                        memory_cost_kib: m,
                        iterations: t,
                        parallelism: p,
                    }
                    .validated(),
                    _ => Err(KeywardError::Kdf(format!(
                        "incomplete argon2id params `{params}`"
                    ))),
                }
            }
            other => Err(KeywardError::Kdf(format!("unknown kdf algorithm `{other}`"))),
        }
    }

    /// Stable single-byte code recorded in secret envelopes.
    pub fn wire_code(&self) -> u8 {
        match self {
            Self::Pbkdf2Sha256 { .. } => 1,
            Self::Argon2id { .. } => 2,
        }
    }

    /// Cost parameters as the three fixed u32 slots of the envelope layout.
    ///
    /// Unused slots are zero.
    pub fn wire_params(&self) -> [u32; 3] {
        match self {
            Self::Pbkdf2Sha256 { iterations } => [*iterations, 0, 0],
            Self::Argon2id {
                memory_cost_kib,
                iterations,
                parallelism,
            } => [*memory_cost_kib, *iterations, *parallelism],
        }
    }

    /// Reconstruct an algorithm from an envelope's code and parameter slots.
    pub fn from_wire(code: u8, params: [u32; 3]) -> Result<Self, KeywardError> {
        match code {
            1 => Self::Pbkdf2Sha256 {
                iterations: params[0],
            }
            .validated(),
            2 => Self::Argon2id {
                memory_cost_kib: params[0],
                iterations: params[1],
                parallelism: params[2],
            }
            .validated(),
            other => Err(KeywardError::Kdf(format!("unknown kdf code {other}"))),
        }
    }

    /// Bounds check applied to parameters read back from stored data.
    fn validated(self) -> Result<Self, KeywardError> {
        match self {
            Self::Pbkdf2Sha256 { iterations } => {
                if iterations == 0 || iterations > MAX_PBKDF2_ITERATIONS {
                    return Err(KeywardError::Kdf(format!(
                        "pbkdf2 iterations {iterations} out of range"
                    )));
                }
            }
            Self::Argon2id {
                memory_cost_kib,
                iterations,
                parallelism,
            } => {
                if memory_cost_kib > MAX_ARGON2_MEMORY_COST
                    || iterations == 0
                    || iterations > MAX_ARGON2_ITERATIONS
                    || parallelism == 0
                    || parallelism > MAX_ARGON2_PARALLELISM
                {
                    return Err(KeywardError::Kdf(format!(
                        "argon2id params m={memory_cost_kib},t={iterations},p={parallelism} out of range"
                    )));
                }
            }
        }
        Ok(self)
    }

    /// Derive a 32-byte key from `secret` and `salt`.
    ///
    /// Deliberately slow (tens to hundreds of milliseconds at production
    /// parameters). Async callers must dispatch onto a blocking worker pool,
    /// e.g. `tokio::task::spawn_blocking`; a derivation, once started, runs
    /// to completion.
    pub fn derive_key(
        &self,
        secret: &[u8],
        salt: &[u8],
    ) -> Result<Zeroizing<[u8; KEY_LEN]>, KeywardError> {
        let mut output = Zeroizing::new([0u8; KEY_LEN]);
        match self {
            Self::Pbkdf2Sha256 { iterations } => {
                let iterations = NonZeroU32::new(*iterations)
                    .ok_or_else(|| KeywardError::Kdf("pbkdf2 iterations must be nonzero".into()))?;
                ring::pbkdf2::derive(
                    ring::pbkdf2::PBKDF2_HMAC_SHA256,
                    iterations,
                    salt,
                    secret,
                    output.as_mut(),
                );
            }
            Self::Argon2id {
                memory_cost_kib,
                iterations,
                parallelism,
            } => {
                let params = argon2::Params::new(
                    *memory_cost_kib,
                    *iterations,
                    *parallelism,
                    Some(KEY_LEN),
                )
                .map_err(|e| KeywardError::Kdf(format!("invalid Argon2id parameters: {e}")))?;
                let argon2 = argon2::Argon2::new(
                    argon2::Algorithm::Argon2id,
                    argon2::Version::V0x13,
                    params,
                );
                argon2
                    .hash_password_into(secret, salt, output.as_mut())
                    .map_err(|e| {
                        KeywardError::Kdf(format!("Argon2id key derivation failed: {e}"))
                    })?;
            }
        }
        Ok(output)
    }
}

/// Generate a random 16-byte salt from the system CSPRNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN], KeywardError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| KeywardError::Internal("failed to generate random salt".to_string()))?;
    Ok(salt)
}
