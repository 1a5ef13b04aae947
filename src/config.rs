// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Boot-time configuration.
//!
//! Nothing here is persisted. Start from [`Config::default`] and adjust with the `with_*` builders:
//!
//! ```
//! use ffb_joystick::config::Config;
//! use ffb_joystick::control::Gains;
//!
//! let config = Config::default()
//!     .with_gains(Gains::new(48, 4, 16, 2))
//!     .with_center(0, 0)
//!     .with_tick_period_ms(2);
//! assert!(config.validate().is_ok());
//! ```

use crate::control::{Gains, Shaping, FORCE_LIMIT};
use crate::error::{Error, Result};
use crate::safety::{DEFAULT_TIMEOUT_MS, MAX_TIMEOUT_MS};

/// Default control tick period.
pub const DEFAULT_TICK_PERIOD_MS: u32 = 1;

/// Default PWM carrier frequency.
pub const DEFAULT_PWM_FREQUENCY_HZ: u32 = 20_000;

/// Highest PWM carrier frequency the 8-bit timer period can be prescaled to.
pub const MAX_PWM_FREQUENCY_HZ: u32 = 100_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub gains: Gains,
    /// Center setpoints (x, y).
    pub center: (i8, i8),
    pub shaping: Shaping,
    pub watchdog_timeout_ms: u32,
    pub tick_period_ms: u32,
    pub pwm_frequency_hz: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gains: Gains::default(),
            center: (0, 0),
            shaping: Shaping::default(),
            watchdog_timeout_ms: DEFAULT_TIMEOUT_MS,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            pwm_frequency_hz: DEFAULT_PWM_FREQUENCY_HZ,
        }
    }
}

impl Config {
    pub fn with_gains(mut self, gains: Gains) -> Self {
        self.gains = gains;
        self
    }

    pub fn with_center(mut self, x: i8, y: i8) -> Self {
        self.center = (x, y);
        self
    }

    /// Set the deadzone threshold and breakaway offset for stiction shaping.
    pub fn with_shaping(mut self, deadzone: i16, stiction: i16) -> Self {
        self.shaping = Shaping { deadzone, stiction };
        self
    }

    pub fn with_watchdog_timeout_ms(mut self, ms: u32) -> Self {
        self.watchdog_timeout_ms = ms;
        self
    }

    pub fn with_tick_period_ms(mut self, ms: u32) -> Self {
        self.tick_period_ms = ms;
        self
    }

    pub fn with_pwm_frequency_hz(mut self, hz: u32) -> Self {
        self.pwm_frequency_hz = hz;
        self
    }

    /// Check every field is usable.
    pub fn validate(&self) -> Result<()> {
        if self.watchdog_timeout_ms == 0 || self.watchdog_timeout_ms > MAX_TIMEOUT_MS {
            return Err(Error::WatchdogTimeout(self.watchdog_timeout_ms));
        }
        if !(0..=FORCE_LIMIT).contains(&self.shaping.deadzone) {
            return Err(Error::InvalidConfig("deadzone must be within 0..=127"));
        }
        if !(0..=FORCE_LIMIT).contains(&self.shaping.stiction) {
            return Err(Error::InvalidConfig("stiction must be within 0..=127"));
        }
        if self.tick_period_ms == 0 {
            return Err(Error::InvalidConfig("tick period must be at least 1 ms"));
        }
        // The loop would trip its own fail-safe.
        if self.tick_period_ms >= self.watchdog_timeout_ms {
            return Err(Error::InvalidConfig(
                "tick period must be shorter than the watchdog timeout",
            ));
        }
        if self.pwm_frequency_hz == 0 || self.pwm_frequency_hz > MAX_PWM_FREQUENCY_HZ {
            return Err(Error::InvalidConfig("PWM frequency must be within 1..=100000 Hz"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();

        assert_eq!(config.watchdog_timeout_ms, 30);
        assert_eq!(config.shaping, Shaping { deadzone: 10, stiction: 60 });
        assert_eq!(config.gains, Gains::new(0, 0, 0, 0));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn watchdog_timeout_must_be_representable() {
        assert_eq!(
            Config::default().with_watchdog_timeout_ms(0).validate(),
            Err(Error::WatchdogTimeout(0))
        );
        assert_eq!(
            Config::default().with_watchdog_timeout_ms(10_000).validate(),
            Err(Error::WatchdogTimeout(10_000))
        );
        assert!(Config::default()
            .with_watchdog_timeout_ms(MAX_TIMEOUT_MS)
            .validate()
            .is_ok());
    }

    #[test]
    fn negative_shaping_is_rejected() {
        assert!(matches!(
            Config::default().with_shaping(-1, 60).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::default().with_shaping(10, -60).validate(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn shaping_beyond_force_range_is_rejected() {
        assert!(matches!(
            Config::default().with_shaping(10, i16::MAX).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::default().with_shaping(128, 60).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(Config::default().with_shaping(127, 127).validate().is_ok());
    }

    #[test]
    fn tick_must_beat_the_watchdog() {
        assert!(Config::default().with_tick_period_ms(0).validate().is_err());
        assert!(Config::default().with_tick_period_ms(30).validate().is_err());
        assert!(Config::default().with_tick_period_ms(29).validate().is_ok());
    }

    #[test]
    fn pwm_frequency_must_be_in_range() {
        assert!(Config::default().with_pwm_frequency_hz(0).validate().is_err());
        assert!(Config::default()
            .with_pwm_frequency_hz(u32::MAX)
            .validate()
            .is_err());
        assert!(Config::default()
            .with_pwm_frequency_hz(MAX_PWM_FREQUENCY_HZ)
            .validate()
            .is_ok());
    }
}
