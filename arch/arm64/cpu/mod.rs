//! CPU module for ARM64
//!
//! This module provides CPU-specific functionality needed on the boot path:
//! - System register layouts and the accessor traits used by bring-up code
//! - Hardware accessors for the current exception level
//! - Data cache maintenance by set/way

pub mod sysreg;

#[cfg(target_arch = "aarch64")]
pub mod cache;

pub use sysreg::*;
