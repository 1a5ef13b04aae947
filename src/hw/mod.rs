//! STM32F777 board support: pins, timers, ADC and the debug USART.

pub mod adc;
pub mod delay;
pub mod gpio;
pub mod pins;
pub mod pwm;
pub mod usart;
pub mod watchdog;

pub use adc::AxisSampler;
pub use delay::SysTickDelay;
pub use gpio::PushPullPin;
pub use pins::BoardPins;
pub use pwm::{Pwm4, PwmChannel};
pub use usart::Usart;
pub use watchdog::TimerWatchdog;
