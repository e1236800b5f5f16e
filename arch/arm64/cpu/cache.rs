//! Data cache maintenance by set/way
//!
//! Set/way operations index the caches physically, so they are only
//! meaningful for the whole hierarchy and only safe once the MMU is off.
//! Reference: ARM DDI 0487I.a - D7.5.9 Performing cache maintenance instructions

use aarch64_cpu::asm::barrier;

/// Cache type field values with a data or unified cache
const CTYPE_DATA_MIN: u64 = 0b010;

#[inline]
fn read_clidr() -> u64 {
    let value: u64;
    unsafe { core::arch::asm!("mrs {}, clidr_el1", out(reg) value, options(nomem, nostack)) };
    value
}

/// Select `level` (data side) in CSSELR and read back its geometry
#[inline]
fn read_ccsidr(level: u64) -> u64 {
    let value: u64;
    unsafe {
        core::arch::asm!("msr csselr_el1, {}", in(reg) level << 1, options(nostack));
        core::arch::asm!("isb", options(nostack));
        core::arch::asm!("mrs {}, ccsidr_el1", out(reg) value, options(nomem, nostack));
    }
    value
}

#[inline]
fn dc_cisw(setway: u64) {
    unsafe { core::arch::asm!("dc cisw, {}", in(reg) setway, options(nostack)) };
}

/// Clean and invalidate every data/unified cache level up to the level of
/// coherency, by set/way
pub fn clean_invalidate_all() {
    let clidr = read_clidr();
    let loc = (clidr >> 24) & 0x7;

    barrier::dsb(barrier::SY);

    for level in 0..loc {
        let ctype = (clidr >> (level * 3)) & 0x7;
        if ctype < CTYPE_DATA_MIN {
            continue;
        }

        let ccsidr = read_ccsidr(level);
        let line_shift = (ccsidr & 0x7) + 4;
        let ways = ((ccsidr >> 3) & 0x3FF) + 1;
        let sets = ((ccsidr >> 13) & 0x7FFF) + 1;
        // way index sits in the top bits of the operand
        let way_shift = ((ways - 1) as u32).leading_zeros() as u64;

        for way in 0..ways {
            for set in 0..sets {
                dc_cisw((way << way_shift) | (set << line_shift) | (level << 1));
            }
        }
        barrier::dsb(barrier::SY);
    }

    unsafe { core::arch::asm!("msr csselr_el1, xzr", options(nostack)) };
    barrier::dsb(barrier::SY);
    barrier::isb(barrier::SY);
}
