//! CPU utilities
//!
//! This module provides CPU-related utility functions used on the boot path.

/// Park the calling core forever.
///
/// Used as the terminal state of the boot path: nothing after a fatal error
/// is allowed to touch the hardware again.
pub fn park_cpu() -> ! {
    loop {
        cfg_if::cfg_if! {
            if #[cfg(target_arch = "aarch64")] {
                aarch64_cpu::asm::wfe();
            } else {
                core::hint::spin_loop();
            }
        }
    }
}
