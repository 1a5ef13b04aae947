// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Closed-loop centering controller for both joystick axes.
//!
//! This controller owns the force output and the watchdog and provides a periodic
//! [`update`](CenteringController::update) that pulls each axis toward its center setpoint.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! controller.init()?;
//!
//! loop {
//!     let (x, y) = sampler.sample();
//!     controller.update(x, y);
//!     delay.delay_ms(config.tick_period_ms);
//! }
//! ```
//!
//! The watchdog expiry handler may run between any two statements of a tick. Actuator writes must
//! therefore go through an output that is atomic with respect to that handler, such as
//! [`SharedOutput`](crate::drivers::SharedOutput).

use embedded_hal::delay::DelayNs;
use log::{debug, info, trace};

use crate::config::Config;
use crate::control::pid::{Shaping, Terms};
use crate::control::state::{AxisHistory, ControllerState, Gains};
use crate::drivers::{Axis, ForceOutput};
use crate::effects::AutoCenter;
use crate::error::Result;
use crate::safety::{self, Watchdog};

/// Operating mode of the centering controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// PWM generation is off and no force is computed.
    Disabled,

    /// Forces are computed and written every tick.
    Enabled,
}

/// Forces commanded on one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Forces {
    pub x: i8,
    pub y: i8,
}

/// Controller state and configuration.
pub struct CenteringController<O, W> {
    output: O,
    watchdog: W,
    state: ControllerState,
    shaping: Shaping,
    watchdog_timeout_ms: u32,
    mode: Mode,
}

impl<O, W> CenteringController<O, W>
where
    O: ForceOutput,
    W: Watchdog,
{
    /// Create a disabled controller from a validated configuration.
    pub fn new(output: O, watchdog: W, config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            output,
            watchdog,
            state: ControllerState::new(config.gains, config.center.0, config.center.1),
            shaping: config.shaping,
            watchdog_timeout_ms: config.watchdog_timeout_ms,
            mode: Mode::Disabled,
        })
    }

    /// Release the direction legs, arm the watchdog in interrupt-only mode and enable force
    /// output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`](crate::Error::Pin) if a leg could not be driven low. The watchdog is
    /// not armed in that case.
    pub fn init(&mut self) -> Result<()> {
        self.output.release()?;

        self.watchdog.start(self.watchdog_timeout_ms);
        info!("watchdog armed, {} ms timeout", self.watchdog_timeout_ms);

        self.enable();
        Ok(())
    }

    /// Configure PWM generation, command zero force on both axes and re-arm the watchdog.
    pub fn enable(&mut self) {
        self.watchdog.feed();
        self.output.set_pwm_enabled(true);
        self.output.zero_all();
        self.mode = Mode::Enabled;
        info!("centering enabled");
    }

    /// Command zero force on both axes and tear down PWM generation.
    pub fn disable(&mut self) {
        self.output.zero_all();
        self.output.set_pwm_enabled(false);
        self.mode = Mode::Disabled;
        info!("centering disabled");
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.mode == Mode::Enabled
    }

    /// Overwrite all gains. Changing `i` zeroes both integral accumulators.
    pub fn set_gains(&mut self, gains: Gains) {
        if self.state.set_gains(gains) {
            debug!("integral gain changed to {}, integrals reset", gains.i);
        }
        debug!(
            "gains p={} i={} d={} lookahead={}",
            gains.p, gains.i, gains.d, gains.lookahead
        );
    }

    #[inline]
    pub fn gains(&self) -> Gains {
        self.state.gains()
    }

    /// Overwrite both center setpoints.
    pub fn set_center(&mut self, x_center: i8, y_center: i8) {
        self.state.set_center(x_center, y_center);
        debug!("center x={} y={}", x_center, y_center);
    }

    #[inline]
    pub fn center(&self, axis: Axis) -> i8 {
        self.state.center(axis)
    }

    #[inline]
    pub fn history(&self, axis: Axis) -> &AxisHistory {
        self.state.history(axis)
    }

    /// Run one control tick with the latest raw axis positions.
    ///
    /// History and integrals are tracked in both modes. Forces are computed, written, and the
    /// watchdog re-armed only while enabled. Returns the commanded forces when enabled.
    pub fn update(&mut self, x_axis: i8, y_axis: i8) -> Option<Forces> {
        let [x, y] = self.state.track(x_axis, y_axis);

        if self.mode == Mode::Disabled {
            return None;
        }

        let gains = self.state.gains();
        let x_terms = Terms::compute(&x, &gains, &self.shaping);
        let y_terms = Terms::compute(&y, &gains, &self.shaping);

        self.output.set_force(Axis::X, x_terms.force);
        self.output.set_force(Axis::Y, y_terms.force);

        self.watchdog.feed();

        trace!(
            "tick x={} y={} -> fx={} fy={}",
            x_axis,
            y_axis,
            x_terms.force,
            y_terms.force
        );

        Some(Forces {
            x: x_terms.force,
            y: y_terms.force,
        })
    }

    /// Busy-wait `ms` milliseconds without letting the watchdog expire.
    pub fn wait_ms<D: DelayNs>(&mut self, delay: &mut D, ms: u32) {
        safety::wait_ms(delay, &mut self.watchdog, ms);
    }

    /// Access the output, e.g. to hand it to diagnostics.
    #[inline]
    pub fn output(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn free(self) -> (O, W) {
        (self.output, self.watchdog)
    }
}

impl<O, W> AutoCenter for CenteringController<O, W>
where
    O: ForceOutput,
    W: Watchdog,
{
    fn set_auto_center(&mut self, enable: bool) {
        match (enable, self.mode) {
            (true, Mode::Disabled) => self.enable(),
            (false, Mode::Enabled) => self.disable(),
            _ => {}
        }
    }
}
