// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the full token lifecycle against a simulated
//! clock: Issued -> Valid -> Expired, with Invalid reachable from any
//! verification of tampered input.

use std::sync::Arc;
use std::time::Duration;

use keyward_core::{KeywardError, ManualClock};
use keyward_token::{SessionToken, TokenService};
use secrecy::SecretString;

fn setup(start: i64) -> (TokenService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start));
    let secret = SecretString::from("an-hmac-secret-of-sufficient-size".to_string());
    (TokenService::new(&secret, clock.clone()), clock)
}

#[test]
fn token_is_valid_until_its_ttl_then_expires() {
    let (svc, clock) = setup(1_700_000_000);
    let token = svc.issue("alice", "u1", Duration::from_secs(1800)).unwrap();

    // Anywhere strictly inside the window the token verifies.
    for offset in [0, 1, 900, 1799] {
        clock.set(1_700_000_000 + offset);
        assert!(svc.verify(&token).is_ok(), "offset {offset} should verify");
    }

    // At and beyond the boundary it is expired.
    for offset in [1800, 1801, 86_400] {
        clock.set(1_700_000_000 + offset);
        assert!(
            matches!(svc.verify(&token).unwrap_err(), KeywardError::Expired),
            "offset {offset} should be expired"
        );
    }
}

#[test]
fn every_single_character_corruption_is_rejected() {
    let (svc, _clock) = setup(1_700_000_000);
    let token = svc
        .issue("alice", "u1", Duration::from_secs(1800))
        .unwrap()
        .into_string();

    for i in 0..token.len() {
        let mut corrupted: Vec<u8> = token.clone().into_bytes();
        // Flip within base64url alphabet so failures exercise the MAC, not
        // just the decoder; dots are left alone (segment structure covered
        // elsewhere).
        if corrupted[i] == b'.' {
            continue;
        }
        corrupted[i] = if corrupted[i] == b'A' { b'B' } else { b'A' };
        let corrupted: SessionToken = String::from_utf8(corrupted).unwrap().parse().unwrap();

        assert!(
            svc.verify(&corrupted).is_err(),
            "corruption at byte {i} must not verify"
        );
    }
}

#[test]
fn verification_is_stateless_across_service_instances() {
    // A second service built from the same secret verifies tokens the
    // first one issued; there is no shared session state.
    let (first, clock) = setup(42);
    let token = first.issue("bob", "u2", Duration::from_secs(300)).unwrap();

    let secret = SecretString::from("an-hmac-secret-of-sufficient-size".to_string());
    let second = TokenService::new(&secret, clock);
    let claims = second.verify(&token).unwrap();
    assert_eq!(claims.sub, "bob");
    assert_eq!(claims.user_id, "u2");
}
