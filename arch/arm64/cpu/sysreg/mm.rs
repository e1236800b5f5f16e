//! Memory Management Register layouts for ARM64
//!
//! Provides MAIR_ELx attribute encoding and the TCR_ELx value used for the
//! firmware's 32-bit translated address space.
//! Reference: ARM DDI 0487I.a - Chapter D8 - The AArch64 Virtual Memory System Architecture

/// MAIR attribute encodings used by the firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MairAttr {
    /// Device-nGnRE
    Device = 0x04,
    /// Normal, inner/outer write-back write-allocate non-transient
    NormalWbwaNonTransient = 0xFF,
}

/// MAIR_ELx (Memory Attribute Indirection Register) configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MairConfig {
    attrs: [u8; 8],
}

impl MairConfig {
    /// Empty MAIR, every index Device-nGnRnE
    pub const fn new() -> Self {
        Self { attrs: [0; 8] }
    }

    /// Place `attr` at `index` (index is taken modulo 8)
    pub const fn with(mut self, attr: MairAttr, index: usize) -> Self {
        self.attrs[index & 0x7] = attr as u8;
        self
    }

    /// Attribute byte at `index`
    pub const fn attr(&self, index: usize) -> u8 {
        self.attrs[index & 0x7]
    }

    /// Encode to MAIR_ELx value
    pub const fn encode(&self) -> u64 {
        let mut value = 0u64;
        let mut i = 0;
        while i < 8 {
            value |= (self.attrs[i] as u64) << (i * 8);
            i += 1;
        }
        value
    }
}

bitflags::bitflags! {
    /// TCR_ELx bits other than the size fields
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TcrFlags: u64 {
        /// Inner region (IRGN0) write-back write-allocate
        const IRGN0_WBWA = 0b01 << 8;
        /// Outer region (ORGN0) write-back write-allocate
        const ORGN0_WBWA = 0b01 << 10;
        /// Shareability (SH0) inner shareable
        const SH0_INNER = 0b11 << 12;
        /// TCR_EL3 RES1 bit 23
        const EL3_RES1_23 = 1 << 23;
        /// TCR_EL3 RES1 bit 31
        const EL3_RES1_31 = 1 << 31;
    }
}

impl TcrFlags {
    /// RES1 bits that must be set when writing TCR_EL3
    pub const EL3_RES1: TcrFlags = TcrFlags::EL3_RES1_23.union(TcrFlags::EL3_RES1_31);
}

/// A TCR_ELx value for TTBR0 walks with a 4KB granule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcrValue {
    flags: TcrFlags,
    t0sz: u8,
}

impl TcrValue {
    /// T0SZ for a 4GB (32-bit) input address space
    pub const T0SZ_4GB: u8 = 32;

    /// Inner-shareable, inner and outer WBWA table walks over `2^(64 - t0sz)` bytes
    pub const fn new(t0sz: u8) -> Self {
        Self {
            flags: TcrFlags::SH0_INNER
                .union(TcrFlags::ORGN0_WBWA)
                .union(TcrFlags::IRGN0_WBWA),
            t0sz: t0sz & 0x3F,
        }
    }

    /// Add the TCR_EL3 RES1 bits
    pub const fn for_el3(mut self) -> Self {
        self.flags = self.flags.union(TcrFlags::EL3_RES1);
        self
    }

    /// Input address space size in bits
    pub const fn input_bits(&self) -> u32 {
        64 - self.t0sz as u32
    }

    /// Encode to TCR_ELx value
    pub const fn encode(&self) -> u64 {
        self.flags.bits() | self.t0sz as u64
    }
}
