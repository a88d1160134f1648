// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits injected into the Keyward components.

pub mod clock;
pub mod code_store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use code_store::CodeStore;
