//! V2M motherboard system registers
//!
//! Only SYS_ID is needed during bring-up. Paired with `MIDR_EL1` it forms
//! the hardware [`IdRegisters`] implementation.

use tock_registers::interfaces::Readable;
use tock_registers::register_structs;
use tock_registers::registers::ReadOnly;

use super::mem_map;
use crate::arch::arm64::cpu::sysreg::{hw, IdRegisters};

register_structs! {
    #[allow(non_snake_case)]
    pub V2mSysRegs {
        (0x00 => SYS_ID: ReadOnly<u32>),
        (0x04 => @END),
    }
}

/// SYS_ID from the V2M block, MIDR from the executing core
pub struct FvpIdRegisters {
    sysregs: &'static V2mSysRegs,
}

impl FvpIdRegisters {
    /// # Safety
    /// `base` must be the address of a mapped V2M system register block.
    pub unsafe fn new(base: usize) -> Self {
        Self {
            sysregs: &*(base as *const V2mSysRegs),
        }
    }

    /// System registers at their fixed FVP address
    pub fn fvp() -> Self {
        // SAFETY: every FVP model places the V2M system registers here, and
        // they are reachable both before and after the MMU is enabled.
        unsafe { Self::new(mem_map::VE_SYSREGS_BASE) }
    }
}

impl IdRegisters for FvpIdRegisters {
    fn read_sys_id(&self) -> u32 {
        self.sysregs.SYS_ID.get()
    }

    fn read_midr(&self) -> u64 {
        hw::read_midr()
    }
}
