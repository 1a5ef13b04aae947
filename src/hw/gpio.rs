// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Push-pull GPIO output exposed through the `embedded-hal` 1.0 `OutputPin` trait.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use stm32f7xx_hal::gpio::{self, Output, PushPull};

/// Push-pull output, generic over any GPIO pin.
pub struct PushPullPin<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> PushPullPin<P, N> {
    pub fn new(pin: gpio::Pin<P, N, Output<PushPull>>) -> Self {
        Self { pin }
    }

    pub fn free(self) -> gpio::Pin<P, N, Output<PushPull>> {
        self.pin
    }
}

impl<const P: char, const N: u8> ErrorType for PushPullPin<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for PushPullPin<P, N> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low();
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high();
        Ok(())
    }
}
