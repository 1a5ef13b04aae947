// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! 8-bit PWM on TIM4 channels 1 and 2 using direct PAC register access.
//!
//! The counter runs 0..=255 and both channels use PWM mode 2: the output is inactive while
//! `CNT < CCR` and active afterwards. A compare value of 255 is therefore minimum drive and 1 is
//! near-maximum drive, matching [`MotorCommand`](crate::drivers::MotorCommand).
//!
//! Each compare write is a single 32-bit store to `CCRx`.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use stm32f7xx_hal::pac;

use crate::drivers::PwmTimer;

const PERIOD: u32 = 256;

/// TIM4 configured as the shared PWM carrier for both axes.
pub struct Pwm4 {
    tim: pac::TIM4,
}

/// One TIM4 compare channel (1 or 2).
pub struct PwmChannel<const C: u8> {
    _private: (),
}

impl Pwm4 {
    /// Configure TIM4 for `pwm_hz` with an 8-bit period and hand out its two compare channels.
    ///
    /// Generation stays stopped until [`PwmTimer::start`].
    pub fn tim4(
        tim4: pac::TIM4,
        timer_clock_hz: u32,
        pwm_hz: u32,
    ) -> (Self, PwmChannel<1>, PwmChannel<2>) {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        let tim = tim4;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let counts_per_s = pwm_hz.max(1).saturating_mul(PERIOD);
        let psc = (timer_clock_hz / counts_per_s).saturating_sub(1).min(0xFFFF);
        tim.psc.write(|w| unsafe { w.bits(psc) });
        tim.arr.write(|w| unsafe { w.bits(PERIOD - 1) });

        // PWM mode 2 with preload on CH1/CH2
        tim.ccmr1_output().modify(|_, w| unsafe {
            w.oc1m()
                .bits(0b111)
                .oc1pe()
                .set_bit()
                .oc2m()
                .bits(0b111)
                .oc2pe()
                .set_bit()
        });

        // Start at minimum drive
        tim.ccr1.write(|w| unsafe { w.bits(PERIOD - 1) });
        tim.ccr2.write(|w| unsafe { w.bits(PERIOD - 1) });

        tim.cr1.modify(|_, w| w.arpe().set_bit());

        // Latch PSC/ARR/CCR
        tim.egr.write(|w| w.ug().set_bit());

        (
            Self { tim },
            PwmChannel { _private: () },
            PwmChannel { _private: () },
        )
    }
}

impl PwmTimer for Pwm4 {
    fn start(&mut self) {
        self.tim
            .ccer
            .modify(|_, w| w.cc1e().set_bit().cc2e().set_bit());
        self.tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    fn stop(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().clear_bit());
        self.tim
            .ccer
            .modify(|_, w| w.cc1e().clear_bit().cc2e().clear_bit());
    }
}

impl<const C: u8> ErrorType for PwmChannel<C> {
    type Error = Infallible;
}

impl<const C: u8> SetDutyCycle for PwmChannel<C> {
    #[inline]
    fn max_duty_cycle(&self) -> u16 {
        (PERIOD - 1) as u16
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let tim = unsafe { &*pac::TIM4::ptr() };
        let duty = u32::from(duty).min(PERIOD - 1);
        match C {
            1 => tim.ccr1.write(|w| unsafe { w.bits(duty) }),
            _ => tim.ccr2.write(|w| unsafe { w.bits(duty) }),
        }
        Ok(())
    }
}
