// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for STM32F777 MCU for the force-feedback joystick.

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, gpiod, Alternate, Analog, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub leds: LedPins,
    pub usart1: Usart1Pins,
    pub x: XAxisPins,
    pub y: YAxisPins,
    pub sense: AxisSensePins,
}

pub struct LedPins {
    pub red: gpiod::PD8<Output<PushPull>>,
    pub yellow: gpiod::PD9<Output<PushPull>>,
    pub green: gpiod::PD10<Output<PushPull>>,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// X axis H-bridge
pub struct XAxisPins {
    pub pwm: gpiod::PD12<Alternate<2>>, // TIM4_CH1
    pub leg_a: gpiod::PD0<Output<PushPull>>,
    pub leg_b: gpiod::PD1<Output<PushPull>>,
}

/// Y axis H-bridge
pub struct YAxisPins {
    pub pwm: gpiod::PD13<Alternate<2>>, // TIM4_CH2
    pub leg_a: gpiod::PD2<Output<PushPull>>,
    pub leg_b: gpiod::PD3<Output<PushPull>>,
}

/// Axis potentiometer wipers
pub struct AxisSensePins {
    pub x: gpioc::PC4<Analog>, // ADC1_IN14
    pub y: gpioc::PC5<Analog>, // ADC1_IN15
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();

        Self {
            leds: LedPins {
                red: gpiod.pd8.into_push_pull_output(),
                yellow: gpiod.pd9.into_push_pull_output(),
                green: gpiod.pd10.into_push_pull_output(),
            },

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            x: XAxisPins {
                pwm: gpiod.pd12.into_alternate::<2>(),
                leg_a: gpiod.pd0.into_push_pull_output(),
                leg_b: gpiod.pd1.into_push_pull_output(),
            },

            y: YAxisPins {
                pwm: gpiod.pd13.into_alternate::<2>(),
                leg_a: gpiod.pd2.into_push_pull_output(),
                leg_b: gpiod.pd3.into_push_pull_output(),
            },

            sense: AxisSensePins {
                x: gpioc.pc4.into_analog(),
                y: gpioc.pc5.into_analog(),
            },
        }
    }
}
