// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Sign-magnitude H-bridge driver for one axis.
//!
//! One direction leg is driven high and the complementary leg low; the PWM compare slot then
//! modulates the opposing leg. The duty convention is inverted ("braking PWM"):
//! - zero force -> duty 255 (minimum drive)
//! - full force (±127) -> duty 1 (near-maximum drive)
//!
//! Wiring:
//! - Leg A: high for non-negative force
//! - Leg B: high for negative force
//! - PWM: compare output for the axis, 8-bit resolution

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::drivers::AxisDriver;
use crate::error::{Error, Result};

/// Logical drive direction of one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Zero or positive force.
    Forward,
    Reverse,
}

/// Direction plus 8-bit duty, recomputed for every write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MotorCommand {
    pub direction: Direction,
    pub duty: u8,
}

impl MotorCommand {
    /// The command for zero force.
    pub const ZERO: Self = Self {
        direction: Direction::Forward,
        duty: u8::MAX,
    };

    /// Map a signed force to direction and inverted duty.
    ///
    /// `i8::MIN` is treated as -127.
    pub fn from_force(force: i8) -> Self {
        let direction = if force >= 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        };
        let magnitude = force.unsigned_abs().min(127);

        Self {
            direction,
            duty: u8::MAX - (magnitude << 1),
        }
    }
}

/// One axis of the actuator: two direction legs and a PWM compare channel.
pub struct HBridge<A, B, P> {
    leg_a: A,
    leg_b: B,
    pwm: P,
}

impl<A, B, P> HBridge<A, B, P>
where
    A: OutputPin,
    B: OutputPin,
    P: SetDutyCycle,
{
    pub fn new(leg_a: A, leg_b: B, pwm: P) -> Self {
        Self { leg_a, leg_b, pwm }
    }

    /// Drive both legs low. Used once at startup before PWM is configured.
    pub fn release(&mut self) -> Result<()> {
        self.leg_a.set_low().map_err(|_| Error::Pin)?;
        self.leg_b.set_low().map_err(|_| Error::Pin)?;
        Ok(())
    }

    /// Write a command: one leg set, the complementary leg cleared, then the duty.
    pub fn apply(&mut self, command: MotorCommand) {
        match command.direction {
            Direction::Forward => {
                self.leg_a.set_high().ok();
                self.leg_b.set_low().ok();
            }
            Direction::Reverse => {
                self.leg_a.set_low().ok();
                self.leg_b.set_high().ok();
            }
        }

        self.pwm
            .set_duty_cycle_fraction(u16::from(command.duty), u16::from(u8::MAX))
            .ok();
    }

    pub fn free(self) -> (A, B, P) {
        (self.leg_a, self.leg_b, self.pwm)
    }
}

impl<A, B, P> AxisDriver for HBridge<A, B, P>
where
    A: OutputPin,
    B: OutputPin,
    P: SetDutyCycle,
{
    #[inline]
    fn set_force(&mut self, force: i8) {
        self.apply(MotorCommand::from_force(force));
    }

    #[inline]
    fn release(&mut self) -> Result<()> {
        HBridge::release(self)
    }
}
