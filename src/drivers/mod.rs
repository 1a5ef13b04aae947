// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Actuator Drivers
//!
//! This module contains the force-output drivers that sit between the control path and the
//! board's pins and timers. Everything here is generic over `embedded-hal` traits.
//!
//! ## Existing drivers
//!
//! - [`hbridge`] – Sign-magnitude H-bridge for one axis (direction legs + inverted PWM duty)
//! - [`output`] – Dual-axis output, PWM timer control and the interrupt-safe shared cell
//! - [`status_led`] – Status LED mirroring a flag

pub mod hbridge;
pub mod output;
pub mod status_led;

pub use hbridge::{Direction, HBridge, MotorCommand};
pub use output::{Axis, AxisDriver, DualAxisOutput, ForceOutput, PwmTimer, SharedOutput};
pub use status_led::{ActiveLevel, StatusLed};
