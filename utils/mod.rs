//! Utility functions
//!
//! Logging backend and small helpers shared by the boot path.

pub mod log;

/// Utility macros
#[macro_export]
macro_rules! is_aligned {
    ($addr:expr, $align:expr) => {
        $addr % $align == 0
    };
}
