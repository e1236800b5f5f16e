//! Memory Management Unit for ARM64
//!
//! Provides stage 1 translation bring-up for the firmware's own address space.

/// Memory attributes
pub mod attrs;

/// Memory layout handed to the table builder
pub mod layout;

/// MMU enable/disable sequencing
pub mod xlat;

// Re-export commonly used types
pub use attrs::{firmware_mair, ATTR_DEVICE_INDEX, ATTR_IWBWA_OWBWA_NTR_INDEX};
pub use layout::{check_bounds, MemLayout, Region, RegionBound, TableBuilder, TableRoot};
pub use xlat::{l1_table_align, XlatController, XlatState};
