//! Recording fakes for pins, PWM channels and force outputs used by the unit tests.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};

use crate::drivers::{Axis, ForceOutput, PwmTimer};

#[derive(Default)]
struct RigState {
    levels: [bool; 4],
    duties: [u16; 2],
    timer_running: bool,
    pin_writes: usize,
}

/// Shared view of every fake pin, compare channel and timer handed out.
#[derive(Clone, Default)]
pub struct Rig {
    state: Rc<RefCell<RigState>>,
}

impl Rig {
    pub fn pin(&self, index: usize) -> FakePin {
        FakePin {
            state: self.state.clone(),
            index,
        }
    }

    pub fn pwm(&self, channel: usize) -> FakePwm {
        FakePwm {
            state: self.state.clone(),
            channel,
        }
    }

    pub fn timer(&self) -> FakeTimer {
        FakeTimer {
            state: self.state.clone(),
        }
    }

    pub fn level(&self, index: usize) -> bool {
        self.state.borrow().levels[index]
    }

    pub fn duty(&self, channel: usize) -> u16 {
        self.state.borrow().duties[channel]
    }

    pub fn timer_running(&self) -> bool {
        self.state.borrow().timer_running
    }

    pub fn pin_writes(&self) -> usize {
        self.state.borrow().pin_writes
    }
}

pub struct FakePin {
    state: Rc<RefCell<RigState>>,
    index: usize,
}

impl FakePin {
    fn write(&mut self, level: bool) -> Result<(), Infallible> {
        let mut state = self.state.borrow_mut();
        state.levels[self.index] = level;
        state.pin_writes += 1;
        Ok(())
    }
}

impl PinErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

pub struct FakePwm {
    state: Rc<RefCell<RigState>>,
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
    state: Rc<RefCell<RigState>>,
}

impl PwmTimer for FakeTimer {
    fn start(&mut self) {
        self.state.borrow_mut().timer_running = true;
    }

    fn stop(&mut self) {
        self.state.borrow_mut().timer_running = false;
    }
}

/// One call made on a [`RecordingOutput`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Write {
    Force(Axis, i8),
    Pwm(bool),
    Release,
}

/// Force output that records every call in order.
#[derive(Default)]
pub struct RecordingOutput {
    pub writes: Vec<Write>,
}

impl ForceOutput for RecordingOutput {
    fn set_force(&mut self, axis: Axis, force: i8) {
        self.writes.push(Write::Force(axis, force));
    }

    fn set_pwm_enabled(&mut self, enabled: bool) {
        self.writes.push(Write::Pwm(enabled));
    }

    fn release(&mut self) -> crate::Result<()> {
        self.writes.push(Write::Release);
        Ok(())
    }
}
