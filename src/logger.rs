// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial logger implementation for the [`log`] facade.
//!
//! Log lines are written to any `core::fmt::Write` sink, normally the debug USART. The sink sits in
//! a critical-section mutex, so logging from the foreground cannot interleave with another writer.
//! Interrupt handlers in this firmware do not log.
//!
//! # Usage
//!
//! ```ignore
//! static LOGGER: SerialLogger<Usart<pac::USART1>> = SerialLogger::new();
//!
//! LOGGER.attach(usart);
//! logger::init(&LOGGER, LevelFilter::Info).ok();
//! info!("boot");
//! ```
//!
//! # Log Output
//!
//! Each line is `LEVEL target - message` terminated with CRLF:
//!
//! ```text
//! INFO ffb_joystick::control::centering - centering enabled
//! ```

use core::cell::RefCell;
use core::fmt::Write;

use critical_section::Mutex;
use log::{LevelFilter, Metadata, Record, SetLoggerError};

pub struct SerialLogger<W> {
    sink: Mutex<RefCell<Option<W>>>,
}

impl<W> SerialLogger<W> {
    pub const fn new() -> Self {
        Self {
            sink: Mutex::new(RefCell::new(None)),
        }
    }

    /// Hand the sink to the logger. Records logged before this are dropped.
    pub fn attach(&self, sink: W) {
        critical_section::with(|cs| {
            self.sink.borrow_ref_mut(cs).replace(sink);
        });
    }

    pub fn detach(&self) -> Option<W> {
        critical_section::with(|cs| self.sink.borrow_ref_mut(cs).take())
    }
}

impl<W> Default for SerialLogger<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> log::Log for SerialLogger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        critical_section::with(|cs| {
            if let Some(sink) = self.sink.borrow_ref_mut(cs).as_mut() {
                let _ = write!(
                    sink,
                    "{} {} - {}\r\n",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        });
    }

    fn flush(&self) {}
}

/// Install `logger` as the global logger.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init<W: Write + Send + 'static>(
    logger: &'static SerialLogger<W>,
    level: LevelFilter,
) -> Result<(), SetLoggerError> {
    log::set_logger(logger).map(|()| log::set_max_level(level))
}
