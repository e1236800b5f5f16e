//! Configuration management
//!
//! This module holds the boot-time settings of the bring-up code: which
//! checks run, how much is logged, and a few fixed platform addresses.
//! There is no runtime source for these; a firmware image picks them at
//! build time through [`BootConfig::new`] or the Cargo features.

use log::LevelFilter;

use crate::arch::arm64::platform::fvp::mem_map;

/// Global bring-up configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootConfig {
    /// Run the consistency checks that cannot be triggered by valid
    /// hardware, only by a bug in the boot stage or the table builder
    /// (translation table root alignment, double writes of a config key)
    pub strict_checks: bool,
    /// Maximum level handed to the `log` facade
    pub log_level: LevelFilter,
    /// Entry point of the non-secure image
    pub ns_image_offset: u64,
    /// Base of the PL011 used for log output
    pub console_base: usize,
}

impl BootConfig {
    /// Build-time defaults: strict checks follow debug assertions or the
    /// `debug` feature, the log level follows `debug`/`verbose`
    pub const fn new() -> Self {
        Self {
            strict_checks: cfg!(debug_assertions) || cfg!(feature = "debug"),
            log_level: default_log_level(),
            ns_image_offset: mem_map::NS_IMAGE_OFFSET,
            console_base: mem_map::UART0_BASE,
        }
    }

    /// Same configuration with strict checks forced on or off
    pub const fn with_strict_checks(mut self, strict_checks: bool) -> Self {
        self.strict_checks = strict_checks;
        self
    }

    /// Same configuration with another log level
    pub const fn with_log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }

    /// Same configuration with another non-secure entry point
    pub const fn with_ns_image_offset(mut self, ns_image_offset: u64) -> Self {
        self.ns_image_offset = ns_image_offset;
        self
    }
}

impl Default for BootConfig {
    fn default() -> Self {
        Self::new()
    }
}

const fn default_log_level() -> LevelFilter {
    if cfg!(feature = "verbose") {
        LevelFilter::Trace
    } else if cfg!(feature = "debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
