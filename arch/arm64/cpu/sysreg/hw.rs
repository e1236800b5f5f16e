//! Hardware system register accessors
//!
//! EL1 registers go through `aarch64-cpu`; it has no EL3 translation
//! registers, so those are accessed with `msr`/`mrs` directly.

use aarch64_cpu::asm::barrier;
use aarch64_cpu::registers::{CurrentEL, MAIR_EL1, MIDR_EL1, SCTLR_EL1, TCR_EL1, TTBR0_EL1};
use tock_registers::interfaces::{Readable, Writeable};

use super::MmuRegisters;
use crate::arch::arm64::cpu::cache;
use crate::arch::arm64::ExceptionLevel;

/// Raw `MIDR_EL1` of the executing core
#[inline]
pub fn read_midr() -> u64 {
    MIDR_EL1.get()
}

/// Exception level of the executing core
#[inline]
pub fn current_el() -> ExceptionLevel {
    ExceptionLevel::from_current_el(CurrentEL.get())
}

/// Translation registers of whichever exception level the core runs at
///
/// The level is sampled once at construction; bring-up never changes level
/// while the MMU is being programmed.
pub struct CurrentElRegs {
    el: ExceptionLevel,
}

impl CurrentElRegs {
    pub fn new() -> Self {
        Self { el: current_el() }
    }
}

impl Default for CurrentElRegs {
    fn default() -> Self {
        Self::new()
    }
}

impl MmuRegisters for CurrentElRegs {
    fn current_el(&self) -> ExceptionLevel {
        self.el
    }

    fn write_mair(&mut self, value: u64) {
        if self.el.is_el3() {
            unsafe { core::arch::asm!("msr mair_el3, {}", in(reg) value, options(nostack)) };
        } else {
            MAIR_EL1.set(value);
        }
    }

    fn write_tcr(&mut self, value: u64) {
        if self.el.is_el3() {
            unsafe { core::arch::asm!("msr tcr_el3, {}", in(reg) value, options(nostack)) };
        } else {
            TCR_EL1.set(value);
        }
        barrier::isb(barrier::SY);
    }

    fn write_ttbr0(&mut self, value: u64) {
        if self.el.is_el3() {
            unsafe { core::arch::asm!("msr ttbr0_el3, {}", in(reg) value, options(nostack)) };
        } else {
            TTBR0_EL1.set(value);
        }
        barrier::isb(barrier::SY);
    }

    fn read_sctlr(&self) -> u64 {
        if self.el.is_el3() {
            let value: u64;
            unsafe { core::arch::asm!("mrs {}, sctlr_el3", out(reg) value, options(nostack)) };
            value
        } else {
            SCTLR_EL1.get()
        }
    }

    fn write_sctlr(&mut self, value: u64) {
        if self.el.is_el3() {
            unsafe { core::arch::asm!("msr sctlr_el3, {}", in(reg) value, options(nostack)) };
        } else {
            SCTLR_EL1.set(value);
        }
        barrier::isb(barrier::SY);
    }

    fn tlbi_alle3(&mut self) {
        unsafe { core::arch::asm!("tlbi alle3", options(nostack)) };
        barrier::dsb(barrier::SY);
        barrier::isb(barrier::SY);
    }

    fn tlbi_vmalle1(&mut self) {
        unsafe { core::arch::asm!("tlbi vmalle1", options(nostack)) };
        barrier::dsb(barrier::SY);
        barrier::isb(barrier::SY);
    }

    fn dcache_clean_invalidate_all(&mut self) {
        cache::clean_invalidate_all();
    }
}
