// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Fail-Safe
//!
//! - [`watchdog`] - Interrupt-only watchdog capability and the watchdog-fed wait.
//! - [`fail_safe`] - Zero-force expiry handler over the shared actuator cell.

pub mod fail_safe;
pub mod watchdog;

pub use fail_safe::FailSafe;
pub use watchdog::{wait_ms, Watchdog, DEFAULT_TIMEOUT_MS, MAX_TIMEOUT_MS};

#[cfg(test)]
pub use watchdog::MockWatchdog;
