//! Cold boot flow
//!
//! The primary core identifies the platform, builds the translation tables
//! and enables its MMU. Secondary cores only enable their MMU, reusing the
//! table root the primary published. The boot protocol guarantees the
//! primary finishes before any secondary starts, so the shared
//! [`PlatformConfig`] and [`TableRoot`] need no locking.
//!
//! Every step returns a [`Result`]; a caller that cannot go on passes the
//! error to [`halt`], the one place where the core stops.

use crate::arch::arm64::cpu::sysreg::{IdRegisters, MmuRegisters};
use crate::arch::arm64::mmu::{MemLayout, Region, TableBuilder, TableRoot, XlatController};
use crate::arch::arm64::platform::fvp::{self, PlatformConfig};
use crate::arch::park_cpu;
use crate::config::BootConfig;
use crate::{Error, Result};

/// Everything the primary core hands to later boot stages and to the
/// secondary cores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColdBoot {
    /// Platform configuration snapshot
    pub platform: PlatformConfig,
    /// Level 1 translation table shared by all cores
    pub root: TableRoot,
    /// Entry point of the non-secure image
    pub ns_entrypoint: u64,
}

/// Primary core: identify the platform, then build tables and enable the MMU
///
/// Nothing is programmed if identification fails.
pub fn cold_boot_primary<I, R, B>(
    id: &I,
    xlat: &mut XlatController<R>,
    builder: &mut B,
    layout: &MemLayout,
    ro: Region,
    coh: Region,
    config: &BootConfig,
) -> Result<ColdBoot>
where
    I: IdRegisters,
    R: MmuRegisters,
    B: TableBuilder,
{
    let platform = fvp::identify_platform(id, config)?;
    let root = xlat.configure(builder, layout, ro, coh)?;
    log::info!("boot: primary MMU on, tables at {:#x}", root.addr());

    Ok(ColdBoot {
        platform,
        root,
        ns_entrypoint: fvp::ns_image_entrypoint(config),
    })
}

/// Secondary core: enable the MMU on the tables built by the primary
pub fn warm_enable_secondary<R: MmuRegisters>(
    regs: R,
    root: TableRoot,
    config: &BootConfig,
) -> Result<XlatController<R>> {
    let mut xlat = XlatController::new(regs, config).with_root(root);
    xlat.enable()?;
    Ok(xlat)
}

/// Stop the boot: log `err` and park the core forever
///
/// Fatal errors and precondition violations end here alike; no error is
/// retried or downgraded.
pub fn halt(err: Error) -> ! {
    if err.is_fatal() {
        log::error!("boot: fatal: {}", err);
    } else {
        log::error!("boot: precondition violated: {}", err);
    }
    log::logger().flush();
    park_cpu()
}

/// Unwrap a boot step, halting on error
pub fn or_halt<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => halt(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::arm64::mock::{FakeIdRegs, FakeTableBuilder, RecordingMmu};
    use crate::arch::arm64::platform::fvp::sys_id::{
        SysId, ARCH_MODEL, BLD_GIC_A53A57_MMAP, HBI_FVP_BASE, REV_FVP,
    };
    use crate::arch::arm64::{ExceptionLevel, XlatState};

    const ROOT: u64 = 0x0403_E000;

    fn base_model() -> FakeIdRegs {
        FakeIdRegs {
            sys_id: SysId::from_fields(REV_FVP, HBI_FVP_BASE, BLD_GIC_A53A57_MMAP, ARCH_MODEL).raw(),
            midr: 0x410F_D034,
        }
    }

    fn regions() -> (Region, Region) {
        (Region::new(0x0400_0000, 0x0402_0000), Region::new(0x0403_F000, 0x0404_0000))
    }

    #[test]
    fn test_primary_then_secondary() {
        let config = BootConfig::new().with_strict_checks(true);
        let mut builder = FakeTableBuilder::returning(ROOT);
        let mut primary = XlatController::new(RecordingMmu::at(ExceptionLevel::EL3), &config);
        let (ro, coh) = regions();

        let boot = cold_boot_primary(&base_model(), &mut primary, &mut builder, &MemLayout::default(), ro, coh, &config)
            .unwrap();

        assert!(boot.platform.has_cci());
        assert_eq!(boot.root, TableRoot::new(ROOT));
        assert_eq!(boot.ns_entrypoint, config.ns_image_offset);
        assert_eq!(primary.state(), XlatState::Enabled);

        let secondary = warm_enable_secondary(RecordingMmu::at(ExceptionLevel::EL3), boot.root, &config).unwrap();
        assert_eq!(secondary.regs().ttbr0, ROOT);
        assert_eq!(builder.calls, 1);
    }

    #[test]
    fn test_unknown_platform_programs_nothing() {
        let config = BootConfig::new();
        let mut builder = FakeTableBuilder::returning(ROOT);
        let mut primary = XlatController::new(RecordingMmu::at(ExceptionLevel::EL3), &config);
        let id = FakeIdRegs { sys_id: 0xFFFF_FFFF, midr: 0 };
        let (ro, coh) = regions();

        let err = cold_boot_primary(&id, &mut primary, &mut builder, &MemLayout::default(), ro, coh, &config)
            .unwrap_err();

        assert_eq!(err, Error::UnknownRevision(0xF));
        assert_eq!(builder.calls, 0);
        assert!(primary.regs().log.is_empty());
    }

    #[test]
    fn test_or_halt_passes_values() {
        assert_eq!(or_halt(Ok(7)), 7);
    }
}
