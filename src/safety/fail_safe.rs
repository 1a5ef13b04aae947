// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Zero-force fail-safe run from the watchdog expiry interrupt.
//!
//! The handler may preempt the control tick at any point. It writes through the same
//! [`SharedOutput`] cell as the controller, so its zero-force command is never interleaved with a
//! half-written tick command. It does not look at the controller mode: expiry always forces zero.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::drivers::{ForceOutput, SharedOutput};

pub struct FailSafe<O> {
    output: SharedOutput<O>,
    trips: AtomicU32,
}

impl<O: ForceOutput> FailSafe<O> {
    pub const fn new() -> Self {
        Self {
            output: SharedOutput::new(),
            trips: AtomicU32::new(0),
        }
    }

    /// The shared output cell, to be installed once and handed to the controller.
    #[inline]
    pub fn output(&self) -> &SharedOutput<O> {
        &self.output
    }

    /// Watchdog expiry handler: command zero force on both axes.
    pub fn on_expiry(&self) {
        self.trips.fetch_add(1, Ordering::Relaxed);
        self.output.with(|output| output.zero_all());
    }

    /// How many times the watchdog has expired since boot.
    #[inline]
    pub fn trip_count(&self) -> u32 {
        self.trips.load(Ordering::Relaxed)
    }
}

impl<O: ForceOutput> Default for FailSafe<O> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::Axis;
    use crate::testing::{RecordingOutput, Write};

    #[test]
    fn expiry_zeroes_both_axes_and_counts() {
        let fail_safe: FailSafe<RecordingOutput> = FailSafe::new();
        fail_safe.output().install(RecordingOutput::default());
        let mut handle = fail_safe.output();
        handle.set_force(Axis::X, 120);
        handle.set_force(Axis::Y, -120);

        fail_safe.on_expiry();
        fail_safe.on_expiry();

        assert_eq!(fail_safe.trip_count(), 2);
        let writes = fail_safe.output().take().unwrap().writes;
        assert_eq!(
            &writes[2..],
            &[
                Write::Force(Axis::X, 0),
                Write::Force(Axis::Y, 0),
                Write::Force(Axis::X, 0),
                Write::Force(Axis::Y, 0)
            ]
        );
    }

    #[test]
    fn expiry_before_install_only_counts() {
        let fail_safe: FailSafe<RecordingOutput> = FailSafe::new();

        fail_safe.on_expiry();

        assert_eq!(fail_safe.trip_count(), 1);
        assert!(!fail_safe.output().is_installed());
    }
}
