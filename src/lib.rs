// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Force-Feedback Joystick Firmware
//!
//! This crate contains the force-output control path of a motorized force-feedback joystick,
//! written in Rust, targeting an STM32F777 MCU.
//!
//! Every control tick the two axis positions are fed to a centering PID-with-lookahead controller,
//! which pulls the stick toward a configurable center and drives the two H-bridges with a
//! sign-magnitude PWM scheme. A hardware countdown timer acts as an interrupt-only watchdog: if the
//! tick stalls, the expiry handler forces both axes to zero force.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`control`] | Centering controller, gains, per-axis history |
//! | [`drivers`] | Sign-magnitude H-bridge output, shared actuator cell, status LED |
//! | [`safety`]  | Watchdog capability and the zero-force fail-safe |
//! | [`effects`] | Capability table for the effect layer (interface only) |
//! | [`config`]  | Boot-time tunables |
//! | [`logger`]  | `log` backend over any `core::fmt::Write` sink |
//! | `hw`        | STM32F7 board support (`board` feature) |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod drivers;
pub mod effects;
pub mod error;
pub mod logger;
pub mod safety;

#[cfg(feature = "board")]
pub mod hw;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::{Error, Result};
