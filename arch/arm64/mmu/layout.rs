//! Memory layout handed to the translation table builder
//!
//! Building the tables themselves is not done here: a [`TableBuilder`] turns
//! a [`MemLayout`] plus the read-only and coherent regions into a table root.

use core::fmt;

use crate::arch::arm64::is_page_aligned;
use crate::{Error, Result};

/// Memory made available to a boot stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemLayout {
    /// Base of the memory owned by the stage
    pub total_base: u64,
    /// Size of the memory owned by the stage
    pub total_size: u64,
    /// Base of the part not yet in use
    pub free_base: u64,
    /// Size of the part not yet in use
    pub free_size: u64,
    /// Placement attributes of the stage
    pub attr: u64,
    /// Link to the next layout descriptor, 0 if none
    pub next: u64,
}

/// Names the four region bounds, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionBound {
    /// Start of the read-only region
    RoStart,
    /// Limit of the read-only region
    RoLimit,
    /// Start of the coherent memory region
    CohStart,
    /// Limit of the coherent memory region
    CohLimit,
}

impl fmt::Display for RegionBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegionBound::RoStart => "read-only region start",
            RegionBound::RoLimit => "read-only region limit",
            RegionBound::CohStart => "coherent region start",
            RegionBound::CohLimit => "coherent region limit",
        })
    }
}

/// Address range `[start, limit)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub start: u64,
    pub limit: u64,
}

impl Region {
    pub const fn new(start: u64, limit: u64) -> Self {
        Self { start, limit }
    }

    fn check_aligned(&self, start: RegionBound, limit: RegionBound) -> Result<()> {
        if !is_page_aligned(self.start) {
            return Err(Error::MisalignedRegion { which: start, addr: self.start });
        }
        if !is_page_aligned(self.limit) {
            return Err(Error::MisalignedRegion { which: limit, addr: self.limit });
        }
        Ok(())
    }
}

/// Verify all four bounds are page aligned, reporting the first offender
pub fn check_bounds(ro: &Region, coh: &Region) -> Result<()> {
    ro.check_aligned(RegionBound::RoStart, RegionBound::RoLimit)?;
    coh.check_aligned(RegionBound::CohStart, RegionBound::CohLimit)
}

/// Physical address of the level 1 translation table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct TableRoot(u64);

impl TableRoot {
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    pub const fn addr(&self) -> u64 {
        self.0
    }

    /// Whether the low `bits` bits of the address are clear
    pub const fn is_aligned_to(&self, bits: u32) -> bool {
        self.0 & ((1u64 << bits) - 1) == 0
    }
}

/// Builds translation tables for a boot stage
pub trait TableBuilder {
    /// Populate the tables for `layout`, mapping `ro` read-only and `coh` as
    /// coherent (uncached) memory, and return the level 1 table
    fn fill_xlation_tables(&mut self, layout: &MemLayout, ro: Region, coh: Region) -> TableRoot;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bounds_ok() {
        let ro = Region::new(0x0400_0000, 0x0402_0000);
        let coh = Region::new(0x0403_F000, 0x0404_0000);
        assert_eq!(check_bounds(&ro, &coh), Ok(()));
    }

    #[test]
    fn test_check_bounds_reports_first_offender() {
        let ro = Region::new(0x0400_0000, 0x0402_0010);
        let coh = Region::new(0x0403_F004, 0x0404_0000);
        assert_eq!(
            check_bounds(&ro, &coh),
            Err(Error::MisalignedRegion { which: RegionBound::RoLimit, addr: 0x0402_0010 })
        );
    }

    #[test]
    fn test_table_root_alignment() {
        assert!(TableRoot::new(0x0403_F000).is_aligned_to(5));
        assert!(TableRoot::new(0x20).is_aligned_to(5));
        assert!(!TableRoot::new(0x10).is_aligned_to(5));
    }
}
