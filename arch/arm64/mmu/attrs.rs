//! Memory attributes for ARM64
//!
//! Provides the MAIR_ELx layout the translation tables are built against.
//! Table entries refer to these indices through their AttrIndx field, so the
//! table builder and the MMU setup must agree on them.

use crate::arch::arm64::cpu::sysreg::{MairAttr, MairConfig};

/// MAIR index of normal, inner/outer write-back write-allocate memory
pub const ATTR_IWBWA_OWBWA_NTR_INDEX: usize = 0;

/// MAIR index of device memory
pub const ATTR_DEVICE_INDEX: usize = 1;

/// MAIR configuration used by the firmware
pub const fn firmware_mair() -> MairConfig {
    MairConfig::new()
        .with(MairAttr::Device, ATTR_DEVICE_INDEX)
        .with(MairAttr::NormalWbwaNonTransient, ATTR_IWBWA_OWBWA_NTR_INDEX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firmware_mair() {
        let mair = firmware_mair();

        assert_eq!(mair.attr(ATTR_IWBWA_OWBWA_NTR_INDEX), 0xFF);
        assert_eq!(mair.attr(ATTR_DEVICE_INDEX), 0x04);
        // remaining indices stay strongly ordered device memory
        assert!((2..8).all(|i| mair.attr(i) == 0));
        assert_eq!(mair.encode(), 0x0000_0000_0000_04FF);
    }
}
