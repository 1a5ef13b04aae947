// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Axis position sampling on ADC1 using direct PAC register access.
//!
//! Each axis wiper is converted at 12 bits and folded into the signed 8-bit position the
//! controller works in: mid-scale reads as 0, the rails as -128 and +127.
//!
//! Example:
//! ```ignore
//! let mut sense = AxisSampler::adc1(dp.ADC1);
//! let (x, y) = sense.sample();
//! ```

use stm32f7xx_hal::pac;

/// ADC1 input channel wired to the X axis wiper (PC4).
pub const X_CHANNEL: u8 = 14;
/// ADC1 input channel wired to the Y axis wiper (PC5).
pub const Y_CHANNEL: u8 = 15;

/// Map a 12-bit conversion onto the signed 8-bit axis range.
#[inline]
pub fn raw_to_position(raw: u16) -> i8 {
    ((raw >> 4) as i16 - 128) as i8
}

/// Blocking two-channel sampler over ADC1.
pub struct AxisSampler {
    adc: pac::ADC1,
}

impl AxisSampler {
    /// Create and initialize ADC1.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };

        // ADC prescaler: PCLK2 / 4
        common.ccr.modify(|_, w| w.adcpre().div4());

        // Power off to configure
        adc1.cr2.modify(|_, w| w.adon().clear_bit());

        // 12-bit, right-aligned, software trigger
        adc1.cr1.modify(|_, w| w.res().bits(0b00));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });

        // Long sample time on both wiper channels
        adc1.smpr1
            .modify(|_, w| unsafe { w.smp14().bits(0b111).smp15().bits(0b111) });

        // Sequence length = 1 conversion
        adc1.sqr1.modify(|_, w| w.l().bits(0));

        // Power on
        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc: adc1 }
    }

    /// Read a single channel.
    pub fn read(&mut self, channel: u8) -> u16 {
        self.adc
            .sqr3
            .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

        self.adc.cr2.modify(|_, w| w.swstart().set_bit());

        while self.adc.sr.read().eoc().bit_is_clear() {}

        self.adc.dr.read().data().bits()
    }

    /// Current (x, y) stick position.
    pub fn sample(&mut self) -> (i8, i8) {
        let x = raw_to_position(self.read(X_CHANNEL));
        let y = raw_to_position(self.read(Y_CHANNEL));
        (x, y)
    }

    #[inline]
    pub fn free(self) -> pac::ADC1 {
        self.adc
    }
}
