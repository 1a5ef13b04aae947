// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! This module provides the centering control path.
//!
//! ## Modules
//!
//! - [`state`] - Gains, center setpoints and per-axis history.
//! - [`pid`] - Integer PID-with-lookahead force terms and stiction shaping.
//! - [`centering`] - Closed-loop centering controller for both axes.

pub mod centering;
pub mod pid;
pub mod state;

pub use centering::{CenteringController, Forces, Mode};
pub use pid::{Shaping, Terms, FORCE_LIMIT};
pub use state::{AxisHistory, ControllerState, Gains, Tracking};
