// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Verification codes for the Keyward security core.
//!
//! Codes are short-lived shared secrets (email verification, password
//! reset) kept behind the injected [`keyward_core::CodeStore`] capability
//! rather than a process-global map, so deployments can back them with an
//! external expiring store.

pub mod generate;
pub mod memory;

pub use generate::generate_code;
pub use memory::MemoryCodeStore;

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use keyward_core::{Clock, CodeStore, ManualClock};

    use super::*;

    #[tokio::test]
    async fn send_then_verify_then_consume_flow() {
        let clock = Arc::new(ManualClock::new(0));
        let store = MemoryCodeStore::new(Arc::clone(&clock) as Arc<dyn Clock>);

        // Send: generate and stash under the recipient.
        let code = generate_code(6).unwrap();
        store
            .put("alice@example.com", &code, Duration::from_secs(900))
            .await
            .unwrap();

        // Verify: compare the submitted code, then consume the entry so it
        // cannot be replayed.
        let stored = store.get("alice@example.com").await.unwrap();
        assert_eq!(stored.as_deref(), Some(code.as_str()));
        store.delete("alice@example.com").await.unwrap();
        assert!(store.get("alice@example.com").await.unwrap().is_none());
    }
}
