//! Ferro-FVP - cold-boot platform bring-up for ARM FVP models
//!
//! This library identifies which Fixed Virtual Platform (Foundation or Base)
//! the firmware is running on, records the variant specific addresses in an
//! immutable configuration snapshot, and drives the stage 1 MMU from physical
//! addressing into the firmware's translated address space and back.
//!
//! Everything runs on the boot path, once per core, before exception handling
//! is trusted. Errors are returned as [`Error`] and end up in a single halt
//! handler, [`boot::halt`].

#![cfg_attr(not(test), no_std)]

// Core modules
#[macro_use]
pub mod utils;
pub mod config;

// Architecture-specific code
pub mod arch;

// Device drivers
pub mod drivers;

// Boot flow
pub mod boot;

use arch::arm64::mmu::RegionBound;
use arch::arm64::platform::fvp::ConfigKey;

pub use config::BootConfig;

/// Ferro-FVP version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common error type for Ferro-FVP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// SYS_ID revision is not the FVP revision
    UnknownRevision(u32),
    /// SYS_ID architecture field is not the model architecture
    UnknownArchModel(u32),
    /// SYS_ID build field names an unknown GIC memory map
    UnknownGicMap(u32),
    /// SYS_ID HBI field names an unknown board
    UnknownBoard(u32),
    /// A memory region bound handed to the MMU setup is not page aligned
    MisalignedRegion {
        /// Which of the four bounds failed
        which: RegionBound,
        /// Offending address
        addr: u64,
    },
    /// The translation table root does not meet the level 1 alignment
    MisalignedTableRoot(u64),
    /// Numeric configuration index outside of the table
    ConfigKeyOutOfRange(usize),
    /// Configuration key written twice during identification
    ConfigKeyRewritten(ConfigKey),
    /// Configuration snapshot requested before every key was written
    ConfigIncomplete(ConfigKey),
    /// MMU enable requested before translation tables were built
    TablesNotBuilt,
    /// MMU enable requested while translation is already on
    AlreadyEnabled,
}

impl Error {
    /// Whether this error comes from the hardware or the caller's data.
    ///
    /// The remaining errors are precondition violations: they can only be
    /// raised by a bug in the calling boot stage. They stop the boot all the
    /// same; [`boot::halt`] parks the core for every error and only uses this
    /// to word the log line.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::UnknownRevision(_)
                | Error::UnknownArchModel(_)
                | Error::UnknownGicMap(_)
                | Error::UnknownBoard(_)
                | Error::MisalignedRegion { .. }
                | Error::MisalignedTableRoot(_)
        )
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::UnknownRevision(rev) => write!(f, "unsupported SYS_ID revision {:#x}", rev),
            Error::UnknownArchModel(arch) => write!(f, "unsupported SYS_ID architecture {:#x}", arch),
            Error::UnknownGicMap(bld) => write!(f, "unknown GIC memory map (build {:#x})", bld),
            Error::UnknownBoard(hbi) => write!(f, "unknown board (HBI {:#x})", hbi),
            Error::MisalignedRegion { which, addr } => {
                write!(f, "{} {:#x} is not page aligned", which, addr)
            }
            Error::MisalignedTableRoot(root) => {
                write!(f, "translation table root {:#x} is misaligned", root)
            }
            Error::ConfigKeyOutOfRange(idx) => write!(f, "config index {} out of range", idx),
            Error::ConfigKeyRewritten(key) => write!(f, "config key {:?} written twice", key),
            Error::ConfigIncomplete(key) => write!(f, "config key {:?} never written", key),
            Error::TablesNotBuilt => f.write_str("translation tables not built"),
            Error::AlreadyEnabled => f.write_str("MMU already enabled"),
        }
    }
}

/// Result type alias
pub type Result<T> = core::result::Result<T, Error>;

// Panic handler for images that link this crate as their runtime
#[cfg(all(not(test), feature = "panic-handler"))]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    log::error!("panic: {}", info);
    arch::park_cpu()
}
