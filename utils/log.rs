//! Boot console logger
//!
//! Backs the `log` facade with the PL011 named by
//! [`BootConfig::console_base`](crate::BootConfig). Lines are written as
//! `[LEVEL] message`. Cores log without locking, so lines from two cores can
//! interleave; bring-up is almost entirely single-core.

use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

use log::{Level, Log, Metadata, Record};

use crate::config::BootConfig;
use crate::drivers::Pl011;

static LOGGER: BootLogger = BootLogger::new();

/// Logger writing to a PL011, silent until a console base is set
pub struct BootLogger {
    console_base: AtomicUsize,
}

impl BootLogger {
    const fn new() -> Self {
        Self {
            console_base: AtomicUsize::new(0),
        }
    }

    fn console(&self) -> Option<Pl011> {
        match self.console_base.load(Ordering::Acquire) {
            0 => None,
            // SAFETY: only `init` stores a base, taken from the boot config.
            base => Some(unsafe { Pl011::new(base) }),
        }
    }
}

impl Log for BootLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(mut console) = self.console() {
            let _ = write_record(&mut console, record.level(), record.args());
        }
    }

    fn flush(&self) {
        if let Some(console) = self.console() {
            console.flush();
        }
    }
}

/// Format one log line
pub fn write_record<W: fmt::Write>(out: &mut W, level: Level, args: &fmt::Arguments<'_>) -> fmt::Result {
    writeln!(out, "[{:<5}] {}", level.as_str(), args)
}

/// Route the `log` facade to the boot console
///
/// Calling it again only updates the console base and level.
pub fn init(config: &BootConfig) {
    LOGGER.console_base.store(config.console_base, Ordering::Release);
    // a second call finds the logger already installed, which is fine
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(config.log_level);
}
