//! System Control Register for ARM64
//!
//! Provides the SCTLR_ELx bits touched during MMU bring-up.
//! Reference: ARM DDI 0487I.a - D17.2.118 SCTLR_EL1, D17.2.120 SCTLR_EL3

bitflags::bitflags! {
    /// SCTLR_ELx bits (the EL1 and EL3 layouts agree on these)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SctlrFlags: u64 {
        /// MMU enable
        const M = 1 << 0;
        /// Alignment check enable
        const A = 1 << 1;
        /// Data cache enable
        const C = 1 << 2;
        /// Instruction cache enable
        const I = 1 << 12;
        /// Write permission implies execute-never
        const WXN = 1 << 19;
    }
}

impl SctlrFlags {
    /// Bits ORed into SCTLR when translation is switched on
    pub const MMU_ON: SctlrFlags = SctlrFlags::WXN
        .union(SctlrFlags::M)
        .union(SctlrFlags::I)
        .union(SctlrFlags::A)
        .union(SctlrFlags::C);

    /// Merge the MMU enable bits into an existing SCTLR value, keeping every
    /// other bit (including RES1 bits) as read
    pub const fn enable_mmu(current: u64) -> u64 {
        current | Self::MMU_ON.bits()
    }
}
