//! FVP memory map
//!
//! Addresses shared by the Foundation and Base models, plus the two GIC
//! layouts a model can be built with.

/// Base of DRAM
pub const DRAM_BASE: u64 = 0x8000_0000;
/// Entry point of the non-secure image
pub const NS_IMAGE_OFFSET: u64 = DRAM_BASE + 0x0800_0000;

/// UART0 base address
pub const UART0_BASE: usize = 0x1C09_0000;

/// V2M motherboard system registers (SYS_ID at offset 0)
pub const VE_SYSREGS_BASE: usize = 0x1C01_0000;

/// GIC layout of models built with the VE memory map
pub mod ve_gic {
    /// Distributor
    pub const GICD_BASE: u64 = 0x2C00_1000;
    /// CPU interface
    pub const GICC_BASE: u64 = 0x2C00_2000;
    /// Hypervisor interface
    pub const GICH_BASE: u64 = 0x2C00_4000;
    /// Virtual CPU interface
    pub const GICV_BASE: u64 = 0x2C00_6000;
}

/// GIC layout of models built with the Base (Cortex-A53/A57) memory map
pub mod base_gic {
    /// Distributor
    pub const GICD_BASE: u64 = 0x2F00_0000;
    /// CPU interface
    pub const GICC_BASE: u64 = 0x2C00_0000;
    /// Hypervisor interface
    pub const GICH_BASE: u64 = 0x2C01_0000;
    /// Virtual CPU interface
    pub const GICV_BASE: u64 = 0x2C02_F000;
}
