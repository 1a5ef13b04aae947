// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Integer PID-with-lookahead force terms.
//!
//! Works in `no_std` and does not allocate memory. All intermediate products are computed in 32
//! bits and saturated, so every term is clamped to the signed force range without overflowing
//! first.

use super::state::{Gains, Tracking};

/// Largest force magnitude any term or output may carry.
pub const FORCE_LIMIT: i16 = 127;

/// Default deadzone threshold for stiction shaping.
pub const DEFAULT_DEADZONE: i16 = 10;

/// Default breakaway offset added outside the deadzone.
pub const DEFAULT_STICTION: i16 = 60;

#[inline]
fn clamp_force(value: i32) -> i16 {
    value.clamp(-i32::from(FORCE_LIMIT), i32::from(FORCE_LIMIT)) as i16
}

/// Stiction compensation: once the commanded force leaves the deadzone, a fixed breakaway offset
/// is added in the same direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Shaping {
    pub deadzone: i16,
    pub stiction: i16,
}

impl Default for Shaping {
    fn default() -> Self {
        Self {
            deadzone: DEFAULT_DEADZONE,
            stiction: DEFAULT_STICTION,
        }
    }
}

impl Shaping {
    /// Apply the breakaway offset. The result is widened to 32 bits and not clamped.
    pub fn apply(&self, total: i16) -> i32 {
        let total = i32::from(total);
        let deadzone = i32::from(self.deadzone);
        let stiction = i32::from(self.stiction);

        if total > deadzone {
            total + stiction
        } else if total < -deadzone {
            total - stiction
        } else {
            total
        }
    }
}

/// The force terms of one axis for one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Terms {
    pub p: i16,
    pub i: i16,
    pub d: i16,
    /// `p + i - d`, before shaping.
    pub total: i16,
    /// `total` after stiction shaping, before the final clamp.
    pub shaped: i32,
    /// Final clamped force written to the driver.
    pub force: i8,
}

impl Terms {
    pub fn compute(tracking: &Tracking, gains: &Gains, shaping: &Shaping) -> Self {
        // ----- P term (error plus lookahead-projected error) -----
        let p = clamp_force(
            (i32::from(tracking.error).saturating_add(tracking.projected_error))
                .saturating_mul(i32::from(gains.p))
                / 32,
        );

        // ----- I term -----
        let i = clamp_force(i32::from(tracking.integral) * i32::from(gains.i) / 256);

        // ----- D term (damping, subtracted) -----
        let d = clamp_force(i32::from(tracking.velocity) * i32::from(gains.d) / 8);

        let total = p + i - d;
        let shaped = shaping.apply(total);
        let force = clamp_force(shaped) as i8;

        Self {
            p,
            i,
            d,
            total,
            shaped,
            force,
        }
    }
}
