// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! SysTick busy-wait delay behind the `embedded-hal` 1.0 `DelayNs` trait.

use cortex_m::delay::Delay;
use embedded_hal::delay::DelayNs;

pub struct SysTickDelay {
    delay: Delay,
}

impl SysTickDelay {
    pub fn new(syst: cortex_m::peripheral::SYST, sysclk_hz: u32) -> Self {
        Self {
            delay: Delay::new(syst, sysclk_hz),
        }
    }

    pub fn free(self) -> cortex_m::peripheral::SYST {
        self.delay.free()
    }
}

impl DelayNs for SysTickDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
