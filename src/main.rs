// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use log::{error, info, LevelFilter};
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{self, Serial},
};
use stm32f7xx_hal as hal;

use ffb_joystick::{
    control::{CenteringController, Gains},
    drivers::{DualAxisOutput, HBridge, StatusLed},
    hw::{
        AxisSampler, BoardPins, PushPullPin, Pwm4, PwmChannel, SysTickDelay, TimerWatchdog, Usart,
    },
    logger::{self, SerialLogger},
    safety::FailSafe,
    Config,
};

type XBridge = HBridge<PushPullPin<'D', 0>, PushPullPin<'D', 1>, PwmChannel<1>>;
type YBridge = HBridge<PushPullPin<'D', 2>, PushPullPin<'D', 3>, PwmChannel<2>>;
type Outputs = DualAxisOutput<XBridge, YBridge, Pwm4>;

static FAIL_SAFE: FailSafe<Outputs> = FailSafe::new();
static LOGGER: SerialLogger<Usart<pac::USART1>> = SerialLogger::new();

/// Time for the stick to come to rest after power-up before ticking.
const SETTLE_MS: u32 = 100;

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let timer_hz = clocks.timclk1().raw();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD);

    // USART1 (DBG)
    let usart_cfg = serial::Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART1, (pins.usart1.tx, pins.usart1.rx), &clocks, usart_cfg);
    LOGGER.attach(Usart::new(serial));
    logger::init(&LOGGER, LevelFilter::Info).ok();

    let config = Config::default().with_gains(Gains::new(48, 4, 16, 2));

    // H-bridges, released by `init` before the PWM carrier is ever started
    let (pwm, ch_x, ch_y) = Pwm4::tim4(dp.TIM4, timer_hz, config.pwm_frequency_hz);
    let x: XBridge = HBridge::new(
        PushPullPin::new(pins.x.leg_a),
        PushPullPin::new(pins.x.leg_b),
        ch_x,
    );
    let y: YBridge = HBridge::new(
        PushPullPin::new(pins.y.leg_a),
        PushPullPin::new(pins.y.leg_b),
        ch_y,
    );
    FAIL_SAFE.output().install(DualAxisOutput::new(x, y, pwm));

    let watchdog = TimerWatchdog::tim6(dp.TIM6, timer_hz);
    let mut delay = SysTickDelay::new(cp.SYST, clocks.sysclk().raw());
    let mut sense = AxisSampler::adc1(dp.ADC1);
    let mut led = StatusLed::active_low(PushPullPin::new(pins.leds.green));

    let mut controller = match CenteringController::new(FAIL_SAFE.output(), watchdog, &config) {
        Ok(controller) => controller,
        Err(e) => {
            error!("refusing to start: {e}");
            loop {
                cortex_m::asm::wfi();
            }
        }
    };

    if let Err(e) = controller.init() {
        error!("init failed: {e}");
        loop {
            cortex_m::asm::wfi();
        }
    }
    controller.wait_ms(&mut delay, SETTLE_MS);
    info!("centering running, tick {} ms", config.tick_period_ms);

    loop {
        let (x, y) = sense.sample();
        controller.update(x, y);
        led.show(controller.is_enabled());
        delay.delay_ms(config.tick_period_ms);
    }
}

#[interrupt]
fn TIM6_DAC() {
    TimerWatchdog::acknowledge();
    FAIL_SAFE.on_expiry();
}
