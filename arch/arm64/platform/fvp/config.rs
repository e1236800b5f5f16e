//! FVP platform configuration table
//!
//! Identification fills a [`PlatformConfigBuilder`]; once every key has a
//! value the builder is consumed into a [`PlatformConfig`] snapshot, which is
//! `Copy` and read-only. Later boot code (GIC setup, CCI setup, per-CPU
//! errata work) only ever sees the snapshot.

use crate::config::BootConfig;
use crate::{Error, Result};

/// Configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(usize)]
pub enum ConfigKey {
    /// GIC distributor base
    GicdAddr = 0,
    /// GIC CPU interface base
    GiccAddr = 1,
    /// GIC hypervisor interface base
    GichAddr = 2,
    /// GIC virtual CPU interface base
    GicvAddr = 3,
    /// Number of affinity level 0 instances (CPUs per cluster)
    MaxAff0 = 4,
    /// Number of affinity level 1 instances (clusters)
    MaxAff1 = 5,
    /// Extended per-CPU setup needed (1) or not (0)
    CpuSetup = 6,
    /// Base FVP memory map (1) or Foundation (0)
    BaseMmap = 7,
    /// CCI-400 interconnect present (1) or not (0)
    HasCci = 8,
}

impl ConfigKey {
    /// Number of keys, the size of the table
    pub const COUNT: usize = 9;

    /// Every key, in index order
    pub const ALL: [ConfigKey; Self::COUNT] = [
        ConfigKey::GicdAddr,
        ConfigKey::GiccAddr,
        ConfigKey::GichAddr,
        ConfigKey::GicvAddr,
        ConfigKey::MaxAff0,
        ConfigKey::MaxAff1,
        ConfigKey::CpuSetup,
        ConfigKey::BaseMmap,
        ConfigKey::HasCci,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for ConfigKey {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        ConfigKey::ALL
            .get(index)
            .copied()
            .ok_or(Error::ConfigKeyOutOfRange(index))
    }
}

/// Write phase of the configuration table
#[derive(Debug)]
pub struct PlatformConfigBuilder {
    values: [u64; ConfigKey::COUNT],
    written: u16,
    strict_checks: bool,
}

impl PlatformConfigBuilder {
    pub fn new(config: &BootConfig) -> Self {
        Self {
            values: [0; ConfigKey::COUNT],
            written: 0,
            strict_checks: config.strict_checks,
        }
    }

    fn is_written(&self, key: ConfigKey) -> bool {
        self.written & (1 << key.index()) != 0
    }

    /// Record `value` for `key`
    ///
    /// With strict checks a second write to the same key is refused;
    /// otherwise the last write wins.
    pub fn set(&mut self, key: ConfigKey, value: u64) -> Result<&mut Self> {
        if self.strict_checks && self.is_written(key) {
            return Err(Error::ConfigKeyRewritten(key));
        }
        self.values[key.index()] = value;
        self.written |= 1 << key.index();
        Ok(self)
    }

    /// Freeze the table; every key must have been written
    pub fn build(self) -> Result<PlatformConfig> {
        if let Some(missing) = ConfigKey::ALL.iter().find(|k| !self.is_written(**k)) {
            return Err(Error::ConfigIncomplete(*missing));
        }
        Ok(PlatformConfig { values: self.values })
    }
}

/// Read phase of the configuration table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformConfig {
    values: [u64; ConfigKey::COUNT],
}

impl PlatformConfig {
    /// Value recorded for `key`
    #[inline]
    pub fn get(&self, key: ConfigKey) -> u64 {
        self.values[key.index()]
    }

    /// Value at a numeric table index, for callers that carry raw indices
    pub fn get_raw(&self, index: usize) -> Result<u64> {
        ConfigKey::try_from(index).map(|key| self.get(key))
    }

    pub fn gicd_base(&self) -> u64 {
        self.get(ConfigKey::GicdAddr)
    }

    pub fn gicc_base(&self) -> u64 {
        self.get(ConfigKey::GiccAddr)
    }

    pub fn gich_base(&self) -> u64 {
        self.get(ConfigKey::GichAddr)
    }

    pub fn gicv_base(&self) -> u64 {
        self.get(ConfigKey::GicvAddr)
    }

    pub fn max_aff0(&self) -> u64 {
        self.get(ConfigKey::MaxAff0)
    }

    pub fn max_aff1(&self) -> u64 {
        self.get(ConfigKey::MaxAff1)
    }

    pub fn needs_cpu_setup(&self) -> bool {
        self.get(ConfigKey::CpuSetup) != 0
    }

    pub fn has_base_mmap(&self) -> bool {
        self.get(ConfigKey::BaseMmap) != 0
    }

    pub fn has_cci(&self) -> bool {
        self.get(ConfigKey::HasCci) != 0
    }

    /// Total number of CPUs the topology allows
    pub fn max_cpus(&self) -> u64 {
        self.max_aff0() * self.max_aff1()
    }
}
