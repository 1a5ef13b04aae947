//! Simulated board for the integration tests: fake pins and PWM behind the real H-bridge driver,
//! plus a millisecond clock that runs the one-shot watchdog.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};

use ffb_joystick::drivers::{DualAxisOutput, ForceOutput, HBridge, PwmTimer};
use ffb_joystick::safety::{FailSafe, Watchdog};

pub const X_LEG_A: usize = 0;
pub const X_LEG_B: usize = 1;
pub const Y_LEG_A: usize = 2;
pub const Y_LEG_B: usize = 3;

pub type Bridge = HBridge<FakePin, FakePin, FakePwm>;
pub type Output = DualAxisOutput<Bridge, Bridge, FakeTimer>;

#[derive(Default)]
struct Levels {
    pins: [bool; 4],
    duties: [u16; 2],
    timer_running: bool,
}

/// Observable state of every fake peripheral.
#[derive(Clone, Default)]
pub struct Rig {
    state: Rc<RefCell<Levels>>,
}

impl Rig {
    pub fn level(&self, pin: usize) -> bool {
        self.state.borrow().pins[pin]
    }

    pub fn duty(&self, channel: usize) -> u16 {
        self.state.borrow().duties[channel]
    }

    pub fn timer_running(&self) -> bool {
        self.state.borrow().timer_running
    }

    fn bridge(&self, leg_a: usize, leg_b: usize, channel: usize) -> Bridge {
        let pin = |index| FakePin {
            state: self.state.clone(),
            index,
        };
        HBridge::new(
            pin(leg_a),
            pin(leg_b),
            FakePwm {
                state: self.state.clone(),
                channel,
            },
        )
    }

    /// Build both bridges and install the pair in `fail_safe`.
    pub fn install(&self, fail_safe: &FailSafe<Output>) {
        let output = DualAxisOutput::new(
            self.bridge(X_LEG_A, X_LEG_B, 0),
            self.bridge(Y_LEG_A, Y_LEG_B, 1),
            FakeTimer {
                state: self.state.clone(),
            },
        );
        fail_safe.output().install(output);
    }
}

pub struct FakePin {
    state: Rc<RefCell<Levels>>,
    index: usize,
}

impl PinErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().pins[self.index] = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().pins[self.index] = true;
        Ok(())
    }
}

pub struct FakePwm {
    state: Rc<RefCell<Levels>>,
    channel: usize,
}

impl PwmErrorType for FakePwm {
    type Error = Infallible;
}

impl SetDutyCycle for FakePwm {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.state.borrow_mut().duties[self.channel] = duty;
        Ok(())
    }
}

pub struct FakeTimer {
    state: Rc<RefCell<Levels>>,
}

impl PwmTimer for FakeTimer {
    fn start(&mut self) {
        self.state.borrow_mut().timer_running = true;
    }

    fn stop(&mut self) {
        self.state.borrow_mut().timer_running = false;
    }
}

#[derive(Default)]
struct Clock {
    now_ms: u32,
    timeout_ms: u32,
    started: bool,
    /// Time of the last feed while the one-shot is counting.
    counting_since: Option<u32>,
}

/// One-shot countdown watchdog driven by a simulated millisecond clock.
///
/// Feeds before `start` are ignored. After expiry the timer stays stopped until the next feed.
#[derive(Clone, Default)]
pub struct SimWatchdog {
    clock: Rc<RefCell<Clock>>,
}

impl SimWatchdog {
    pub fn now_ms(&self) -> u32 {
        self.clock.borrow().now_ms
    }

    /// Let `ms` milliseconds pass, running the fail-safe if the countdown runs out.
    pub fn advance<O: ForceOutput>(&self, ms: u32, fail_safe: &FailSafe<O>) {
        for _ in 0..ms {
            let expired = {
                let mut clock = self.clock.borrow_mut();
                clock.now_ms += 1;
                match clock.counting_since {
                    Some(since) if clock.now_ms - since >= clock.timeout_ms => {
                        clock.counting_since = None;
                        true
                    }
                    _ => false,
                }
            };

            if expired {
                fail_safe.on_expiry();
            }
        }
    }
}

impl Watchdog for SimWatchdog {
    fn start(&mut self, timeout_ms: u32) {
        let mut clock = self.clock.borrow_mut();
        clock.timeout_ms = timeout_ms;
        clock.started = true;
        clock.counting_since = Some(clock.now_ms);
    }

    fn feed(&mut self) {
        let mut clock = self.clock.borrow_mut();
        if clock.started {
            clock.counting_since = Some(clock.now_ms);
        }
    }

    fn stop(&mut self) {
        let mut clock = self.clock.borrow_mut();
        clock.started = false;
        clock.counting_since = None;
    }
}

/// Busy-wait delay that advances the simulated clock.
pub struct SimDelay<'a, O> {
    pub watchdog: SimWatchdog,
    pub fail_safe: &'a FailSafe<O>,
}

impl<O: ForceOutput> DelayNs for SimDelay<'_, O> {
    fn delay_ns(&mut self, ns: u32) {
        self.watchdog
            .advance(ns.div_ceil(1_000_000), self.fail_safe);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.watchdog.advance(ms, self.fail_safe);
    }
}
