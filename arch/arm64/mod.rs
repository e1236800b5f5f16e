//! ARM64 (AArch64) Architecture Support for Ferro-FVP
//!
//! This module provides the AArch64 pieces of cold-boot bring-up:
//! - System register access for identification and the stage 1 MMU
//! - Data cache maintenance by set/way
//! - Translation control (MAIR/TCR/TTBR0/SCTLR programming)
//! - FVP platform identification
//!
//! ## Exception levels
//!
//! Bring-up runs either at EL3 (secure monitor, the usual cold boot case) or
//! at EL1. The register variant and TLB invalidation scope follow the level
//! reported by `CurrentEL`.
//!
//! ## References
//! - [ARM Architecture Reference Manual ARMv8-A](https://developer.arm.com/documentation/ddi0487/latest)
//! - [Fixed Virtual Platforms Reference Guide](https://developer.arm.com/documentation/100966/latest)

pub mod cpu;
pub mod mmu;
pub mod platform;

#[cfg(test)]
pub(crate) mod mock;


// Re-export key types and functions
pub use cpu::sysreg::{IdRegisters, MmuRegisters};
pub use mmu::{MemLayout, Region, TableBuilder, TableRoot, XlatController, XlatState};
pub use platform::fvp;

/// Page size (4KB)
pub const PAGE_SIZE: u64 = 4096;

/// Check that an address sits on a page boundary
#[inline]
pub const fn is_page_aligned(addr: u64) -> bool {
    is_aligned!(addr, PAGE_SIZE)
}

/// ARM64 exception levels (EL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ExceptionLevel {
    /// EL0 - Application level
    EL0 = 0,
    /// EL1 - OS kernel level
    EL1 = 1,
    /// EL2 - Hypervisor level
    EL2 = 2,
    /// EL3 - Secure monitor level
    EL3 = 3,
}

impl ExceptionLevel {
    /// Decode the raw `CurrentEL` register value (EL lives in bits [3:2])
    pub const fn from_current_el(raw: u64) -> Self {
        match (raw >> 2) & 0x3 {
            0 => ExceptionLevel::EL0,
            1 => ExceptionLevel::EL1,
            2 => ExceptionLevel::EL2,
            _ => ExceptionLevel::EL3,
        }
    }

    /// Highest privilege and security level
    pub const fn is_el3(self) -> bool {
        matches!(self, ExceptionLevel::EL3)
    }
}
