//! System register access for ARM64 bring-up
//!
//! Bring-up code never touches a system register directly. It goes through
//! two collaborator traits:
//! - [`IdRegisters`] for the platform and processor identification words
//! - [`MmuRegisters`] for the stage 1 translation registers of the current
//!   exception level, TLB invalidation and cache maintenance
//!
//! `hw` implements both on real hardware; the unit tests substitute
//! recording doubles.
//! Reference: ARM DDI 0487I.a - Chapter D17 - AArch64 System Register Descriptions

use crate::arch::arm64::ExceptionLevel;

/// System control register layout
pub mod sctlr;

/// Memory management register layouts (MAIR, TCR)
pub mod mm;

/// Identification register layouts
pub mod id_regs;

/// Hardware accessors
#[cfg(target_arch = "aarch64")]
pub mod hw;

// Re-export commonly used types
pub use id_regs::{CpuPart, MidrEl1};
pub use mm::{MairAttr, MairConfig, TcrFlags, TcrValue};
pub use sctlr::SctlrFlags;

/// Identification words consulted during platform identification
pub trait IdRegisters {
    /// Raw V2M `SYS_ID` word of the motherboard system registers
    fn read_sys_id(&self) -> u32;

    /// Raw `MIDR_EL1`
    fn read_midr(&self) -> u64;
}

/// Stage 1 translation registers of the current exception level
///
/// Every write targets the `_EL3` or `_EL1` register variant according to
/// [`MmuRegisters::current_el`]. Implementations must issue the barriers the
/// architecture requires around each write; callers only control the order.
pub trait MmuRegisters {
    /// Exception level the core is executing at
    fn current_el(&self) -> ExceptionLevel;

    /// Write MAIR_ELx
    fn write_mair(&mut self, value: u64);

    /// Write TCR_ELx
    fn write_tcr(&mut self, value: u64);

    /// Write TTBR0_ELx
    fn write_ttbr0(&mut self, value: u64);

    /// Read SCTLR_ELx
    fn read_sctlr(&self) -> u64;

    /// Write SCTLR_ELx
    fn write_sctlr(&mut self, value: u64);

    /// Invalidate all EL3 TLB entries (`TLBI ALLE3`)
    fn tlbi_alle3(&mut self);

    /// Invalidate all stage 1 EL1&0 TLB entries (`TLBI VMALLE1`)
    fn tlbi_vmalle1(&mut self);

    /// Clean and invalidate every data cache level by set/way (`DC CISW`)
    fn dcache_clean_invalidate_all(&mut self);
}
