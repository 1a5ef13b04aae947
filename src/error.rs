// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Crate error type.
//!
//! The control tick itself never fails. Errors only come out of setup: validating the boot
//! configuration, arming the watchdog, and driving the actuator pins into their initial state.

use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A configuration field is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Watchdog timeout (ms) the countdown timer cannot represent.
    #[error("watchdog timeout of {0} ms is outside the supported range")]
    WatchdogTimeout(u32),

    /// An actuator pin or compare write reported an error.
    #[error("actuator pin write failed")]
    Pin,

    /// Effect type id outside 1..=12.
    #[error("unknown effect type {0:#04x}")]
    UnknownEffectType(u8),
}

/// Result type alias for the firmware.
pub type Result<T> = core::result::Result<T, Error>;
