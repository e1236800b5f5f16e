//! V2M SYS_ID register layout
//!
//! |31   28|27      16|15   12|11    8|7        0|
//! |-------|----------|-------|-------|----------|
//! |  REV  |   HBI    | BUILD | ARCH  |  FPGA    |
//!
//! FVP models report REV 0 and ARCH 1 (model). HBI names the board and
//! BUILD the GIC memory map the model was built with.

use core::fmt;

use tock_registers::fields::FieldValue;
use tock_registers::{register_bitfields, LocalRegisterCopy};

register_bitfields! [u32,
    pub SYS_ID [
        /// Board revision
        REV OFFSET(28) NUMBITS(4) [],
        /// Hardware board identifier
        HBI OFFSET(16) NUMBITS(12) [],
        /// Build variant
        BUILD OFFSET(12) NUMBITS(4) [],
        /// Architecture
        ARCH OFFSET(8) NUMBITS(4) []
    ]
];

/// Revision reported by every FVP
pub const REV_FVP: u32 = 0x0;
/// Architecture field of a software model
pub const ARCH_MODEL: u32 = 0x1;

/// HBI of the Foundation model
pub const HBI_FOUNDATION: u32 = 0x010;
/// HBI of the Base models (AEMv8 and Cortex)
pub const HBI_FVP_BASE: u32 = 0x020;

/// Build with the VE GIC memory map
pub const BLD_GIC_VE_MMAP: u32 = 0x0;
/// Build with the Cortex-A53/A57 GIC memory map
pub const BLD_GIC_A53A57_MMAP: u32 = 0x1;

/// Decoded view of a SYS_ID word
#[derive(Clone, Copy)]
pub struct SysId(LocalRegisterCopy<u32, SYS_ID::Register>);

impl SysId {
    pub fn new(raw: u32) -> Self {
        Self(LocalRegisterCopy::new(raw))
    }

    /// Compose a SYS_ID word; each value is truncated to its field width
    pub fn from_fields(rev: u32, hbi: u32, build: u32, arch: u32) -> Self {
        let mut reg = LocalRegisterCopy::new(0);
        let fields: FieldValue<u32, SYS_ID::Register> =
            SYS_ID::REV.val(rev) + SYS_ID::HBI.val(hbi) + SYS_ID::BUILD.val(build) + SYS_ID::ARCH.val(arch);
        reg.write(fields);
        Self(reg)
    }

    pub fn raw(&self) -> u32 {
        self.0.get()
    }

    pub fn revision(&self) -> u32 {
        self.0.read(SYS_ID::REV)
    }

    pub fn hbi(&self) -> u32 {
        self.0.read(SYS_ID::HBI)
    }

    pub fn build(&self) -> u32 {
        self.0.read(SYS_ID::BUILD)
    }

    pub fn arch(&self) -> u32 {
        self.0.read(SYS_ID::ARCH)
    }
}

impl fmt::Debug for SysId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SysId")
            .field("rev", &self.revision())
            .field("hbi", &self.hbi())
            .field("build", &self.build())
            .field("arch", &self.arch())
            .finish()
    }
}
