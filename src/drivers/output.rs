// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Dual-axis force output and the interrupt-safe cell that shares it.
//!
//! The foreground control tick and the watchdog expiry handler both command forces. A direction
//! write followed by a duty write is several register stores, so every write through
//! [`SharedOutput`] runs inside a critical section and the handler can never observe a torn
//! command.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::error::Result;

/// Joystick axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// Anything that can turn a signed force into actuator drive for a single axis.
pub trait AxisDriver {
    fn set_force(&mut self, force: i8);

    /// Put the direction legs in their idle state (both low).
    fn release(&mut self) -> Result<()>;
}

/// Timer that generates the PWM carrier for both compare slots.
pub trait PwmTimer {
    fn start(&mut self);
    fn stop(&mut self);
}

/// Force sink used by the controller and the fail-safe.
pub trait ForceOutput {
    /// Command `force` in [-127, 127] on one axis. Cannot fail.
    fn set_force(&mut self, axis: Axis, force: i8);

    /// Configure (true) or tear down (false) hardware PWM generation.
    fn set_pwm_enabled(&mut self, enabled: bool);

    /// Drive every direction leg to its known idle state before PWM is started.
    fn release(&mut self) -> Result<()>;

    fn zero_all(&mut self) {
        for axis in Axis::ALL {
            self.set_force(axis, 0);
        }
    }
}

/// Both axis drivers plus the PWM timer they share.
pub struct DualAxisOutput<X, Y, T> {
    x: X,
    y: Y,
    timer: T,
    pwm_enabled: bool,
}

impl<X, Y, T> DualAxisOutput<X, Y, T>
where
    X: AxisDriver,
    Y: AxisDriver,
    T: PwmTimer,
{
    /// Combine the axis drivers. PWM generation starts stopped.
    pub fn new(x: X, y: Y, mut timer: T) -> Self {
        timer.stop();
        Self {
            x,
            y,
            timer,
            pwm_enabled: false,
        }
    }

    #[inline]
    pub fn pwm_enabled(&self) -> bool {
        self.pwm_enabled
    }

    pub fn free(self) -> (X, Y, T) {
        (self.x, self.y, self.timer)
    }
}

impl<X, Y, T> ForceOutput for DualAxisOutput<X, Y, T>
where
    X: AxisDriver,
    Y: AxisDriver,
    T: PwmTimer,
{
    fn set_force(&mut self, axis: Axis, force: i8) {
        match axis {
            Axis::X => self.x.set_force(force),
            Axis::Y => self.y.set_force(force),
        }
    }

    fn set_pwm_enabled(&mut self, enabled: bool) {
        if enabled {
            self.timer.start();
        } else {
            self.timer.stop();
        }
        self.pwm_enabled = enabled;
    }

    fn release(&mut self) -> Result<()> {
        self.x.release()?;
        self.y.release()
    }
}

/// Force output shared between the foreground and an interrupt handler.
///
/// Intended to live in a `static`. Writes made before [`install`](Self::install) are dropped.
pub struct SharedOutput<O> {
    inner: Mutex<RefCell<Option<O>>>,
}

impl<O> SharedOutput<O> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Hand the output to the cell, returning any previously installed one.
    pub fn install(&self, output: O) -> Option<O> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(output))
    }

    pub fn take(&self) -> Option<O> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Run `f` on the output with interrupts masked.
    pub fn with<R>(&self, f: impl FnOnce(&mut O) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<O> Default for SharedOutput<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ForceOutput> ForceOutput for &SharedOutput<O> {
    fn set_force(&mut self, axis: Axis, force: i8) {
        self.with(|output| output.set_force(axis, force));
    }

    fn set_pwm_enabled(&mut self, enabled: bool) {
        self.with(|output| output.set_pwm_enabled(enabled));
    }

    fn zero_all(&mut self) {
        self.with(|output| output.zero_all());
    }

    /// An empty cell has no legs to release.
    fn release(&mut self) -> Result<()> {
        self.with(|output| output.release()).unwrap_or(Ok(()))
    }
}
