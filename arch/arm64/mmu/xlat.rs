//! Stage 1 MMU enable/disable sequencing
//!
//! The primary core calls [`XlatController::configure`] once during cold
//! boot: it builds the translation tables and switches translation on. The
//! returned [`TableRoot`] is then handed to every other core, which only
//! calls [`XlatController::enable`] on a controller created with
//! [`XlatController::with_root`].
//!
//! Enable programs the registers in a fixed order, each step relying on the
//! previous one:
//!
//! | step | register / operation       |
//! |------|----------------------------|
//! | 1    | MAIR_ELx                   |
//! | 2    | TCR_ELx                    |
//! | 3    | TLB invalidate (EL3 / EL1) |
//! | 4    | TTBR0_ELx                  |
//! | 5    | SCTLR_ELx (M, C, I, A, WXN)|
//!
//! Disable clears MAIR, TCR, TTBR0 and SCTLR and only then cleans and
//! invalidates the data caches by set/way, so the maintenance runs on
//! physical addresses.

use crate::arch::arm64::cpu::sysreg::{MmuRegisters, SctlrFlags, TcrValue};
use crate::arch::arm64::mmu::attrs::firmware_mair;
use crate::arch::arm64::mmu::layout::{check_bounds, MemLayout, Region, TableBuilder, TableRoot};
use crate::config::BootConfig;
use crate::{Error, Result};

/// Bits resolved by one level 3 descriptor with a 4KB granule
const BITS_PER_4K_L3DESC: u32 = 12;
/// Bits resolved down from a level 2 descriptor
const BITS_PER_4K_L2DESC: u32 = 9 + BITS_PER_4K_L3DESC;
/// Bits resolved down from a level 1 descriptor
const BITS_PER_4K_L1DESC: u32 = 9 + BITS_PER_4K_L2DESC;

/// Required alignment (log2 bytes) of a level 1 table walked with `tcr`
///
/// The table holds `2^(input bits - L1 descriptor bits)` 8-byte entries.
pub const fn l1_table_align(tcr: &TcrValue) -> u32 {
    let desc_bits = tcr.input_bits() - BITS_PER_4K_L1DESC;
    desc_bits + 3
}

/// Translation state of one core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XlatState {
    /// Physical addressing
    Disabled,
    /// Stage 1 translation on
    Enabled,
}

/// Drives the translation registers of one core
#[derive(Debug)]
pub struct XlatController<R: MmuRegisters> {
    regs: R,
    root: Option<TableRoot>,
    state: XlatState,
    strict_checks: bool,
}

impl<R: MmuRegisters> XlatController<R> {
    /// Controller with no tables, translation assumed off
    pub fn new(regs: R, config: &BootConfig) -> Self {
        Self {
            regs,
            root: None,
            state: XlatState::Disabled,
            strict_checks: config.strict_checks,
        }
    }

    /// Adopt tables already built by the primary core
    pub fn with_root(mut self, root: TableRoot) -> Self {
        self.root = Some(root);
        self
    }

    /// Table root this controller programs into TTBR0
    pub fn root(&self) -> Option<TableRoot> {
        self.root
    }

    pub fn state(&self) -> XlatState {
        self.state
    }

    pub fn regs(&self) -> &R {
        &self.regs
    }

    pub fn into_regs(self) -> R {
        self.regs
    }

    /// Build the translation tables and enable the MMU
    ///
    /// Every bound is checked before the builder runs. The new root is only
    /// kept once the MMU is on; if enable refuses it the previous root stays.
    pub fn configure<B: TableBuilder>(
        &mut self,
        builder: &mut B,
        layout: &MemLayout,
        ro: Region,
        coh: Region,
    ) -> Result<TableRoot> {
        if self.state == XlatState::Enabled {
            return Err(Error::AlreadyEnabled);
        }
        check_bounds(&ro, &coh)?;

        let root = builder.fill_xlation_tables(layout, ro, coh);
        log::debug!(
            "xlat: tables built at {:#x} (ro {:#x}-{:#x}, coherent {:#x}-{:#x})",
            root.addr(), ro.start, ro.limit, coh.start, coh.limit
        );
        let prev = self.root.replace(root);
        if let Err(err) = self.enable() {
            self.root = prev;
            return Err(err);
        }
        Ok(root)
    }

    /// Enable the MMU using the tables at [`XlatController::root`]
    pub fn enable(&mut self) -> Result<()> {
        if self.state == XlatState::Enabled {
            return Err(Error::AlreadyEnabled);
        }
        let root = self.root.ok_or(Error::TablesNotBuilt)?;

        let el = self.regs.current_el();
        let tcr = if el.is_el3() {
            TcrValue::new(TcrValue::T0SZ_4GB).for_el3()
        } else {
            TcrValue::new(TcrValue::T0SZ_4GB)
        };

        // Only the table builder can produce a misaligned root, so this is
        // checked in strict mode only.
        if self.strict_checks && !root.is_aligned_to(l1_table_align(&tcr)) {
            return Err(Error::MisalignedTableRoot(root.addr()));
        }

        let mair = firmware_mair().encode();
        log::trace!("xlat: {:?} MAIR {:#x} TCR {:#x} TTBR0 {:#x}", el, mair, tcr.encode(), root.addr());

        self.regs.write_mair(mair);
        self.regs.write_tcr(tcr.encode());
        if el.is_el3() {
            self.regs.tlbi_alle3();
        } else {
            self.regs.tlbi_vmalle1();
        }
        self.regs.write_ttbr0(root.addr());

        let sctlr = SctlrFlags::enable_mmu(self.regs.read_sctlr());
        self.regs.write_sctlr(sctlr);

        self.state = XlatState::Enabled;
        log::debug!("xlat: MMU enabled at {:?}", el);
        Ok(())
    }

    /// Turn translation and caches off and flush the data caches
    ///
    /// The table root is kept, so [`XlatController::enable`] can bring the
    /// same mapping back.
    pub fn disable(&mut self) {
        self.regs.write_mair(0);
        self.regs.write_tcr(0);
        self.regs.write_ttbr0(0);
        self.regs.write_sctlr(0);

        self.regs.dcache_clean_invalidate_all();

        self.state = XlatState::Disabled;
        log::debug!("xlat: MMU disabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::arm64::mock::{FakeTableBuilder, RecordingMmu, RegOp};
    use crate::arch::arm64::mmu::RegionBound;
    use crate::arch::arm64::ExceptionLevel;
    use test_case::test_case;

    const ROOT: u64 = 0x0403_E000;

    fn strict() -> BootConfig {
        BootConfig::new().with_strict_checks(true)
    }

    fn relaxed() -> BootConfig {
        BootConfig::new().with_strict_checks(false)
    }

    fn regions() -> (Region, Region) {
        (Region::new(0x0400_0000, 0x0402_0000), Region::new(0x0403_F000, 0x0404_0000))
    }

    #[test]
    fn test_l1_alignment_for_4gb() {
        assert_eq!(l1_table_align(&TcrValue::new(TcrValue::T0SZ_4GB)), 5);
    }

    #[test]
    fn test_enable_order_el3() {
        let mut xlat = XlatController::new(RecordingMmu::at(ExceptionLevel::EL3), &strict())
            .with_root(TableRoot::new(ROOT));
        xlat.enable().unwrap();

        let tcr = (1 << 31) | (1 << 23) | (3 << 12) | (1 << 10) | (1 << 8) | 32;
        let sctlr = (1 << 19) | (1 << 12) | (1 << 2) | (1 << 1) | 1;
        assert_eq!(
            xlat.regs().log,
            vec![
                RegOp::Mair(0x04FF),
                RegOp::Tcr(tcr),
                RegOp::TlbiAllE3,
                RegOp::Ttbr0(ROOT),
                RegOp::Sctlr(sctlr),
            ]
        );
        assert_eq!(xlat.state(), XlatState::Enabled);
    }

    #[test]
    fn test_enable_order_el1() {
        let mut xlat = XlatController::new(RecordingMmu::at(ExceptionLevel::EL1), &strict())
            .with_root(TableRoot::new(ROOT));
        xlat.enable().unwrap();

        let log = &xlat.regs().log;
        assert_eq!(log[1], RegOp::Tcr((3 << 12) | (1 << 10) | (1 << 8) | 32));
        assert_eq!(log[2], RegOp::TlbiVmallE1);
        assert!(!log.contains(&RegOp::TlbiAllE3));
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn test_enable_keeps_existing_sctlr_bits() {
        let res1 = (1 << 29) | (1 << 28) | (1 << 23) | (1 << 18) | (1 << 16) | (1 << 11) | (1 << 5) | (1 << 4);
        let mmu = RecordingMmu::at(ExceptionLevel::EL3).with_sctlr(res1);
        let mut xlat = XlatController::new(mmu, &strict()).with_root(TableRoot::new(ROOT));
        xlat.enable().unwrap();

        assert_eq!(xlat.regs().sctlr, res1 | SctlrFlags::MMU_ON.bits());
    }

    #[test]
    fn test_enable_without_tables() {
        let mut xlat = XlatController::new(RecordingMmu::at(ExceptionLevel::EL3), &strict());
        assert_eq!(xlat.enable(), Err(Error::TablesNotBuilt));
        assert!(xlat.regs().log.is_empty());
    }

    #[test]
    fn test_enable_twice() {
        let mut xlat = XlatController::new(RecordingMmu::at(ExceptionLevel::EL3), &strict())
            .with_root(TableRoot::new(ROOT));
        xlat.enable().unwrap();
        assert_eq!(xlat.enable(), Err(Error::AlreadyEnabled));
        assert_eq!(xlat.regs().log.len(), 5);
    }

    #[test]
    fn test_misaligned_root_strict() {
        let mut xlat = XlatController::new(RecordingMmu::at(ExceptionLevel::EL3), &strict())
            .with_root(TableRoot::new(ROOT + 0x10));
        assert_eq!(xlat.enable(), Err(Error::MisalignedTableRoot(ROOT + 0x10)));
        assert!(xlat.regs().log.is_empty());
        assert_eq!(xlat.state(), XlatState::Disabled);
    }

    #[test]
    fn test_misaligned_root_relaxed() {
        let mut xlat = XlatController::new(RecordingMmu::at(ExceptionLevel::EL3), &relaxed())
            .with_root(TableRoot::new(ROOT + 0x10));
        assert_eq!(xlat.enable(), Ok(()));
        assert_eq!(xlat.regs().ttbr0, ROOT + 0x10);
    }

    #[test]
    fn test_enable_then_disable() {
        let mut xlat = XlatController::new(RecordingMmu::at(ExceptionLevel::EL3), &strict())
            .with_root(TableRoot::new(ROOT));
        xlat.enable().unwrap();
        xlat.disable();

        let regs = xlat.regs();
        assert_eq!((regs.mair, regs.tcr, regs.ttbr0, regs.sctlr), (0, 0, 0, 0));
        assert_eq!(regs.count(RegOp::DcacheCleanInvalidateAll), 1);
        assert_eq!(
            &regs.log[5..],
            &[
                RegOp::Mair(0),
                RegOp::Tcr(0),
                RegOp::Ttbr0(0),
                RegOp::Sctlr(0),
                RegOp::DcacheCleanInvalidateAll,
            ]
        );
        assert_eq!(xlat.state(), XlatState::Disabled);
        assert_eq!(xlat.root(), Some(TableRoot::new(ROOT)));
    }

    #[test]
    fn test_reenable_after_disable() {
        let mut xlat = XlatController::new(RecordingMmu::at(ExceptionLevel::EL1), &strict())
            .with_root(TableRoot::new(ROOT));
        xlat.enable().unwrap();
        xlat.disable();
        xlat.enable().unwrap();
        assert_eq!(xlat.regs().ttbr0, ROOT);
        assert_eq!(xlat.state(), XlatState::Enabled);
    }

    #[test]
    fn test_configure_builds_and_enables() {
        let mut builder = FakeTableBuilder::returning(ROOT);
        let mut xlat = XlatController::new(RecordingMmu::at(ExceptionLevel::EL3), &strict());
        let layout = MemLayout { total_base: 0x0400_0000, total_size: 0x0004_0000, ..Default::default() };
        let (ro, coh) = regions();

        let root = xlat.configure(&mut builder, &layout, ro, coh).unwrap();

        assert_eq!(root, TableRoot::new(ROOT));
        assert_eq!(builder.calls, 1);
        assert_eq!(builder.last, Some((layout, ro, coh)));
        assert_eq!(xlat.root(), Some(root));
        assert_eq!(xlat.regs().ttbr0, ROOT);
        assert_eq!(xlat.state(), XlatState::Enabled);
    }

    #[test]
    fn test_configure_misaligned_root_keeps_nothing() {
        let mut builder = FakeTableBuilder::returning(ROOT + 0x10);
        let mut xlat = XlatController::new(RecordingMmu::at(ExceptionLevel::EL3), &strict());
        let (ro, coh) = regions();

        let err = xlat.configure(&mut builder, &MemLayout::default(), ro, coh).unwrap_err();

        assert_eq!(err, Error::MisalignedTableRoot(ROOT + 0x10));
        assert_eq!(xlat.root(), None);
        assert!(xlat.regs().log.is_empty());
        assert_eq!(xlat.state(), XlatState::Disabled);
    }

    #[test]
    fn test_configure_failure_restores_previous_root() {
        let mut builder = FakeTableBuilder::returning(ROOT + 0x10);
        let mut xlat = XlatController::new(RecordingMmu::at(ExceptionLevel::EL1), &strict())
            .with_root(TableRoot::new(ROOT));
        let (ro, coh) = regions();

        assert!(xlat.configure(&mut builder, &MemLayout::default(), ro, coh).is_err());
        assert_eq!(xlat.root(), Some(TableRoot::new(ROOT)));
    }

    #[test_case(0x0400_0001, 0x0402_0000, 0x0403_F000, 0x0404_0000, RegionBound::RoStart ; "ro start")]
    #[test_case(0x0400_0000, 0x0402_0800, 0x0403_F000, 0x0404_0000, RegionBound::RoLimit ; "ro limit")]
    #[test_case(0x0400_0000, 0x0402_0000, 0x0403_F100, 0x0404_0000, RegionBound::CohStart ; "coherent start")]
    #[test_case(0x0400_0000, 0x0402_0000, 0x0403_F000, 0x0404_0FFF, RegionBound::CohLimit ; "coherent limit")]
    fn test_configure_rejects_misaligned(ro_start: u64, ro_limit: u64, coh_start: u64, coh_limit: u64, which: RegionBound) {
        let mut builder = FakeTableBuilder::returning(ROOT);
        let mut xlat = XlatController::new(RecordingMmu::at(ExceptionLevel::EL3), &relaxed());

        let err = xlat
            .configure(&mut builder, &MemLayout::default(), Region::new(ro_start, ro_limit), Region::new(coh_start, coh_limit))
            .unwrap_err();

        assert!(matches!(err, Error::MisalignedRegion { which: w, .. } if w == which));
        assert!(err.is_fatal());
        assert_eq!(builder.calls, 0);
        assert!(xlat.regs().log.is_empty());
        assert_eq!(xlat.root(), None);
    }
}
