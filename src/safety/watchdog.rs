// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Interrupt-only watchdog capability.
//!
//! The watchdog is a hardware countdown that raises an interrupt (never a reset) when it is not
//! fed within its timeout. Re-arm points are every enabled control tick and the Disabled ->
//! Enabled transition.

use embedded_hal::delay::DelayNs;

/// Default fail-safe timeout.
pub const DEFAULT_TIMEOUT_MS: u32 = 30;

/// Longest timeout the countdown timer can represent (16-bit counter at 10 kHz).
pub const MAX_TIMEOUT_MS: u32 = 6_553;

/// Platform countdown timer armed in interrupt-only mode.
///
/// The expiry handler itself is registered by the platform (an interrupt vector on the board)
/// and should call [`FailSafe::on_expiry`](super::FailSafe::on_expiry).
#[cfg_attr(test, mockall::automock)]
pub trait Watchdog {
    /// Arm the countdown with `timeout_ms`, interrupt on expiry.
    fn start(&mut self, timeout_ms: u32);

    /// Restart the countdown.
    fn feed(&mut self);

    /// Halt the countdown without raising the expiry interrupt. The controller never calls this.
    fn stop(&mut self);
}

/// Busy-wait `ms` milliseconds in 1 ms steps, feeding the watchdog before every step.
pub fn wait_ms<D, W>(delay: &mut D, watchdog: &mut W, ms: u32)
where
    D: DelayNs,
    W: Watchdog + ?Sized,
{
    for _ in 0..ms {
        watchdog.feed();
        delay.delay_ms(1);
    }
}
