// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! One-shot watchdog on basic timer TIM6.
//!
//! TIM6 counts at 10 kHz in one-pulse mode. Every feed rewinds the counter and re-enables it, so
//! the update interrupt only fires when no feed lands within the timeout. The `TIM6_DAC` handler
//! must call [`TimerWatchdog::acknowledge`] before zeroing the outputs.

use cortex_m::peripheral::NVIC;
use stm32f7xx_hal::pac::{self, Interrupt};

use crate::safety::{Watchdog, MAX_TIMEOUT_MS};

const TICK_HZ: u32 = 10_000;
const TICKS_PER_MS: u32 = TICK_HZ / 1_000;

pub struct TimerWatchdog {
    tim: pac::TIM6,
}

impl TimerWatchdog {
    /// Take TIM6 and prescale it to 10 kHz. The timer stays idle until [`Watchdog::start`].
    pub fn tim6(tim6: pac::TIM6, timer_clock_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim6en().set_bit());

        let tim = tim6;
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let psc = (timer_clock_hz / TICK_HZ).saturating_sub(1).min(0xFFFF);
        tim.psc.write(|w| unsafe { w.bits(psc) });

        // Stop at update, and only counter overflow raises UIF
        tim.cr1.modify(|_, w| w.opm().set_bit().urs().set_bit());

        Self { tim }
    }

    /// Clear the pending update flag. Call first thing in the `TIM6_DAC` handler.
    #[inline]
    pub fn acknowledge() {
        let tim = unsafe { &*pac::TIM6::ptr() };
        tim.sr.modify(|_, w| w.uif().clear_bit());
    }

    pub fn free(self) -> pac::TIM6 {
        self.tim
    }
}

impl Watchdog for TimerWatchdog {
    fn start(&mut self, timeout_ms: u32) {
        let ticks = timeout_ms.min(MAX_TIMEOUT_MS) * TICKS_PER_MS;

        self.tim.cr1.modify(|_, w| w.cen().clear_bit());
        self.tim.arr.write(|w| unsafe { w.bits(ticks.max(1)) });

        // Latch PSC/ARR without raising UIF
        self.tim.egr.write(|w| w.ug().set_bit());
        self.tim.sr.modify(|_, w| w.uif().clear_bit());

        self.tim.dier.modify(|_, w| w.uie().set_bit());
        unsafe { NVIC::unmask(Interrupt::TIM6_DAC) };

        self.feed();
    }

    #[inline]
    fn feed(&mut self) {
        self.tim.cnt.write(|w| unsafe { w.bits(0) });
        self.tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    fn stop(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().clear_bit());
        self.tim.dier.modify(|_, w| w.uie().clear_bit());
    }
}
