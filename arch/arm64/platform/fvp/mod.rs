//! ARM Fixed Virtual Platform support
//!
//! One firmware image runs on the Foundation model and on both flavours of
//! the Base model (AEMv8 and Cortex-A53/A57). The V2M `SYS_ID` register tells
//! them apart; [`identify_platform`] decodes it once during cold boot and
//! returns the resulting [`PlatformConfig`].

pub mod config;
pub mod mem_map;
pub mod sys_id;

#[cfg(target_arch = "aarch64")]
pub mod v2m;

pub use config::{ConfigKey, PlatformConfig, PlatformConfigBuilder};
pub use sys_id::SysId;

use crate::arch::arm64::cpu::sysreg::{IdRegisters, MidrEl1};
use crate::config::BootConfig;
use crate::{Error, Result};
use mem_map::{base_gic, ve_gic};
use sys_id::{ARCH_MODEL, BLD_GIC_A53A57_MMAP, BLD_GIC_VE_MMAP, HBI_FOUNDATION, HBI_FVP_BASE, REV_FVP};

/// FVP board, from the SYS_ID HBI field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FvpVariant {
    /// Foundation model: one cluster of four CPUs, no CCI
    Foundation,
    /// Base model: two clusters of four CPUs behind a CCI-400
    Base,
}

impl FvpVariant {
    pub fn from_hbi(hbi: u32) -> Result<Self> {
        match hbi {
            HBI_FOUNDATION => Ok(FvpVariant::Foundation),
            HBI_FVP_BASE => Ok(FvpVariant::Base),
            other => Err(Error::UnknownBoard(other)),
        }
    }
}

/// GIC memory map, from the SYS_ID BUILD field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GicMap {
    /// Versatile Express layout
    Ve,
    /// Cortex-A53/A57 Base model layout
    BaseA53A57,
}

/// Base addresses of the four GIC register frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GicBases {
    pub gicd: u64,
    pub gicc: u64,
    pub gich: u64,
    pub gicv: u64,
}

impl GicMap {
    pub fn from_build(build: u32) -> Result<Self> {
        match build {
            BLD_GIC_VE_MMAP => Ok(GicMap::Ve),
            BLD_GIC_A53A57_MMAP => Ok(GicMap::BaseA53A57),
            other => Err(Error::UnknownGicMap(other)),
        }
    }

    pub const fn bases(self) -> GicBases {
        match self {
            GicMap::Ve => GicBases {
                gicd: ve_gic::GICD_BASE,
                gicc: ve_gic::GICC_BASE,
                gich: ve_gic::GICH_BASE,
                gicv: ve_gic::GICV_BASE,
            },
            GicMap::BaseA53A57 => GicBases {
                gicd: base_gic::GICD_BASE,
                gicc: base_gic::GICC_BASE,
                gich: base_gic::GICH_BASE,
                gicv: base_gic::GICV_BASE,
            },
        }
    }
}

/// Identify the FVP model and build its configuration table
///
/// All four SYS_ID fields are validated before the table is touched, so an
/// unknown model never yields a partially filled configuration. On the Base
/// model the extended per-CPU setup depends on the core: only Cortex-A53 and
/// Cortex-A57 need it, an AEMv8 core simply skips it.
pub fn identify_platform<I: IdRegisters>(id: &I, config: &BootConfig) -> Result<PlatformConfig> {
    let sys_id = SysId::new(id.read_sys_id());
    log::debug!("fvp: SYS_ID {:#010x} {:?}", sys_id.raw(), sys_id);

    if sys_id.revision() != REV_FVP {
        return Err(Error::UnknownRevision(sys_id.revision()));
    }
    if sys_id.arch() != ARCH_MODEL {
        return Err(Error::UnknownArchModel(sys_id.arch()));
    }
    let gic = GicMap::from_build(sys_id.build())?;
    let variant = FvpVariant::from_hbi(sys_id.hbi())?;

    let mut builder = PlatformConfigBuilder::new(config);

    let bases = gic.bases();
    builder
        .set(ConfigKey::GicdAddr, bases.gicd)?
        .set(ConfigKey::GiccAddr, bases.gicc)?
        .set(ConfigKey::GichAddr, bases.gich)?
        .set(ConfigKey::GicvAddr, bases.gicv)?;

    match variant {
        FvpVariant::Foundation => {
            builder
                .set(ConfigKey::MaxAff0, 4)?
                .set(ConfigKey::MaxAff1, 1)?
                .set(ConfigKey::CpuSetup, 0)?
                .set(ConfigKey::BaseMmap, 0)?
                .set(ConfigKey::HasCci, 0)?;
        }
        FvpVariant::Base => {
            let part = MidrEl1::new(id.read_midr()).cpu_part();
            log::debug!("fvp: core {:?}", part);
            builder
                .set(ConfigKey::CpuSetup, part.needs_cpu_setup() as u64)?
                .set(ConfigKey::MaxAff0, 4)?
                .set(ConfigKey::MaxAff1, 2)?
                .set(ConfigKey::BaseMmap, 1)?
                .set(ConfigKey::HasCci, 1)?;
        }
    }

    let platform = builder.build()?;
    log::info!("fvp: {:?} model, {:?} GIC map, {} CPUs", variant, gic, platform.max_cpus());
    Ok(platform)
}

/// Entry point of the non-secure image
pub fn ns_image_entrypoint(config: &BootConfig) -> u64 {
    config.ns_image_offset
}
