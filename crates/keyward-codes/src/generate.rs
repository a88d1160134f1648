// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Verification-code generation.

use keyward_core::KeywardError;
use ring::rand::{SecureRandom, SystemRandom};

/// Generate a random decimal verification code of `len` digits.
///
/// Digits come from the system CSPRNG with rejection sampling, so every
/// digit is uniform (no modulo bias). Leading zeros are legal; the code is
/// a string, not a number.
pub fn generate_code(len: usize) -> Result<String, KeywardError> {
    let rng = SystemRandom::new();
    let mut code = String::with_capacity(len);
    let mut byte = [0u8; 1];
    while code.len() < len {
        rng.fill(&mut byte)
            .map_err(|_| KeywardError::Internal("failed to generate random digit".to_string()))?;
        // 250..=255 would skew the modulo; redraw.
        if byte[0] < 250 {
            code.push(char::from(b'0' + byte[0] % 10));
        }
    }
    Ok(code)
}
