// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Controller state: tunable gains, center setpoints and per-axis history.
//!
//! This is plain data plus mutators. Nothing here touches hardware.

use crate::drivers::Axis;

/// Tunable centering gains.
///
/// `lookahead` is a time-like factor (in ticks) applied to the velocity estimate to project the
/// error forward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Gains {
    pub p: i16,
    pub i: i16,
    pub d: i16,
    pub lookahead: u16,
}

impl Gains {
    pub const fn new(p: i16, i: i16, d: i16, lookahead: u16) -> Self {
        Self { p, i, d, lookahead }
    }
}

/// Values derived from one sample that the force terms are computed from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tracking {
    pub velocity: i16,
    pub error: i16,
    pub projected_error: i32,
    /// Integral accumulator after this tick's error was added.
    pub integral: i16,
}

/// History carried between ticks for one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AxisHistory {
    last_position: i8,
    last_velocity: i16,
    integral: i16,
}

impl AxisHistory {
    #[inline]
    pub fn last_position(&self) -> i8 {
        self.last_position
    }

    #[inline]
    pub fn last_velocity(&self) -> i16 {
        self.last_velocity
    }

    #[inline]
    pub fn integral(&self) -> i16 {
        self.integral
    }

    /// Seed the history from the very first sample so the first velocity estimate is zero.
    fn prime(&mut self, position: i8) {
        self.last_position = position;
    }

    /// Smoothed per-tick displacement: half the new displacement plus half the previous estimate.
    pub fn velocity_estimate(&self, current: i8) -> i16 {
        let displacement = i16::from(current) - i16::from(self.last_position);
        displacement / 2 + self.last_velocity / 2
    }

    /// Advance one tick: estimate velocity, compute the errors, accumulate the integral and store
    /// the sample for the next tick.
    ///
    /// The integral is not clamped. It wraps on overflow.
    pub fn track(&mut self, current: i8, center: i8, lookahead: u16) -> Tracking {
        let velocity = self.velocity_estimate(current);
        let error = i16::from(center) - i16::from(current);
        let projected_error = i32::from(error)
            .saturating_sub(i32::from(velocity).saturating_mul(i32::from(lookahead)));

        self.integral = self.integral.wrapping_add(error);

        self.last_velocity = velocity;
        self.last_position = current;

        Tracking {
            velocity,
            error,
            projected_error,
            integral: self.integral,
        }
    }

    fn reset_integral(&mut self) {
        self.integral = 0;
    }
}

/// Everything the centering controller remembers between ticks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControllerState {
    gains: Gains,
    center: [i8; 2],
    history: [AxisHistory; 2],
    primed: bool,
}

impl ControllerState {
    pub fn new(gains: Gains, x_center: i8, y_center: i8) -> Self {
        Self {
            gains,
            center: [x_center, y_center],
            history: [AxisHistory::default(); 2],
            primed: false,
        }
    }

    #[inline]
    pub fn gains(&self) -> Gains {
        self.gains
    }

    #[inline]
    pub fn center(&self, axis: Axis) -> i8 {
        self.center[axis.index()]
    }

    #[inline]
    pub fn history(&self, axis: Axis) -> &AxisHistory {
        &self.history[axis.index()]
    }

    /// Overwrite all four gains. A change of `i` zeroes both integral accumulators.
    ///
    /// Returns true if the accumulators were reset.
    pub fn set_gains(&mut self, gains: Gains) -> bool {
        let reset = gains.i != self.gains.i;
        if reset {
            for history in self.history.iter_mut() {
                history.reset_integral();
            }
        }
        self.gains = gains;
        reset
    }

    /// Overwrite both center setpoints. Integral and velocity history are left alone.
    pub fn set_center(&mut self, x_center: i8, y_center: i8) {
        self.center = [x_center, y_center];
    }

    /// Track one sample pair. The first call primes the position history of both axes.
    pub fn track(&mut self, x: i8, y: i8) -> [Tracking; 2] {
        if !self.primed {
            self.history[Axis::X.index()].prime(x);
            self.history[Axis::Y.index()].prime(y);
            self.primed = true;
        }

        let lookahead = self.gains.lookahead;
        [
            self.history[Axis::X.index()].track(x, self.center[Axis::X.index()], lookahead),
            self.history[Axis::Y.index()].track(y, self.center[Axis::Y.index()], lookahead),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_integrals() -> ControllerState {
        let mut state = ControllerState::new(Gains::new(10, 4, 2, 0), 0, 0);
        for _ in 0..5 {
            state.track(20, -30);
        }
        assert_eq!(state.history(Axis::X).integral(), -100);
        assert_eq!(state.history(Axis::Y).integral(), 150);
        state
    }

    #[test]
    fn changing_i_resets_both_integrals() {
        let mut state = state_with_integrals();

        assert!(state.set_gains(Gains::new(10, 5, 2, 0)));
        assert_eq!(state.history(Axis::X).integral(), 0);
        assert_eq!(state.history(Axis::Y).integral(), 0);
        assert_eq!(state.gains(), Gains::new(10, 5, 2, 0));
    }

    #[test]
    fn keeping_i_keeps_integrals() {
        let mut state = state_with_integrals();

        assert!(!state.set_gains(Gains::new(99, 4, -3, 7)));
        assert_eq!(state.history(Axis::X).integral(), -100);
        assert_eq!(state.history(Axis::Y).integral(), 150);
        assert_eq!(state.gains().lookahead, 7);
    }

    #[test]
    fn every_i_change_in_a_sequence_resets() {
        let mut state = ControllerState::default();
        for i in [3, 3, -2, 0, 0, 8] {
            state.track(40, 40);
            state.track(50, -50);
            let before = state.gains().i;
            state.set_gains(Gains::new(1, i, 1, 1));
            if before != i {
                assert_eq!(state.history(Axis::X).integral(), 0);
                assert_eq!(state.history(Axis::Y).integral(), 0);
            } else {
                assert_ne!(state.history(Axis::X).integral(), 0);
            }
        }
    }

    #[test]
    fn set_center_has_no_side_effects() {
        let mut state = state_with_integrals();
        let x_before = *state.history(Axis::X);
        let y_before = *state.history(Axis::Y);

        state.set_center(12, -7);

        assert_eq!(state.center(Axis::X), 12);
        assert_eq!(state.center(Axis::Y), -7);
        assert_eq!(*state.history(Axis::X), x_before);
        assert_eq!(*state.history(Axis::Y), y_before);
    }

    #[test]
    fn first_sample_primes_history() {
        let mut state = ControllerState::default();

        let [x, y] = state.track(100, -100);

        assert_eq!(x.velocity, 0);
        assert_eq!(y.velocity, 0);
        assert_eq!(x.error, -100);
        assert_eq!(y.error, 100);
        assert_eq!(state.history(Axis::X).last_position(), 100);
    }

    #[test]
    fn velocity_is_smoothed_displacement() {
        let mut history = AxisHistory::default();

        let first = history.track(10, 0, 0);
        assert_eq!(first.velocity, 5);

        // (10 - 10) / 2 + 5 / 2
        let second = history.track(10, 0, 0);
        assert_eq!(second.velocity, 2);

        // (-1 - 10) / 2 + 2 / 2 truncates toward zero
        let third = history.track(-1, 0, 0);
        assert_eq!(third.velocity, -4);
    }

    #[test]
    fn projected_error_leads_by_velocity() {
        let mut history = AxisHistory::default();

        let t = history.track(20, 0, 3);

        assert_eq!(t.velocity, 10);
        assert_eq!(t.error, -20);
        assert_eq!(t.projected_error, -20 - 30);
    }

    #[test]
    fn integral_wraps_instead_of_panicking() {
        let mut history = AxisHistory::default();
        history.prime(-128);
        for _ in 0..300 {
            history.track(-128, 127, 0);
        }
        // 300 * 255 = 76500, wrapped to 16 bits
        assert_eq!(history.integral(), (76_500i32 as i16));
    }
}
