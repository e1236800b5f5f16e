//! Identification Registers for ARM64
//!
//! Provides the MIDR_EL1 view used to recognise the core implementation.
//! Reference: ARM DDI 0487I.a - D17.2.100 MIDR_EL1

/// MIDR_EL1 - Main ID Register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct MidrEl1 {
    pub raw: u64,
}

impl MidrEl1 {
    /// ARM implementer ID
    pub const ARM_IMPLEMENTER: u8 = 0x41;

    const PART_SHIFT: u64 = 4;
    const PART_MASK: u64 = 0xFFF;

    pub const fn new(raw: u64) -> Self {
        Self { raw }
    }

    /// Create MIDR from fields
    pub const fn from_fields(implementer: u8, variant: u8, architecture: u8,
                             part_num: u16, revision: u8) -> Self {
        let raw = ((implementer as u64) << 24) |
                  (((variant & 0xF) as u64) << 20) |
                  (((architecture & 0xF) as u64) << 16) |
                  (((part_num as u64) & Self::PART_MASK) << Self::PART_SHIFT) |
                  ((revision & 0xF) as u64);
        Self { raw }
    }

    /// Get Implementer (e.g., ARM = 0x41)
    pub const fn implementer(&self) -> u8 {
        ((self.raw >> 24) & 0xFF) as u8
    }

    /// Get Part Number
    pub const fn part_number(&self) -> u16 {
        ((self.raw >> Self::PART_SHIFT) & Self::PART_MASK) as u16
    }

    /// Get Revision
    pub const fn revision(&self) -> u8 {
        (self.raw & 0xF) as u8
    }

    /// Core implementation, by part number
    pub const fn cpu_part(&self) -> CpuPart {
        CpuPart::from_part_number(self.part_number())
    }
}

/// Core implementations the FVP Base model can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuPart {
    /// Cortex-A53
    CortexA53,
    /// Cortex-A57
    CortexA57,
    /// Anything else (AEMv8 and friends)
    Other(u16),
}

impl CpuPart {
    /// MIDR part number of the Cortex-A53
    pub const PN_A53: u16 = 0xD03;
    /// MIDR part number of the Cortex-A57
    pub const PN_A57: u16 = 0xD07;

    pub const fn from_part_number(pn: u16) -> Self {
        match pn {
            Self::PN_A53 => CpuPart::CortexA53,
            Self::PN_A57 => CpuPart::CortexA57,
            other => CpuPart::Other(other),
        }
    }

    /// Whether the core needs the extended per-CPU setup done later in boot
    pub const fn needs_cpu_setup(&self) -> bool {
        matches!(self, CpuPart::CortexA53 | CpuPart::CortexA57)
    }
}
