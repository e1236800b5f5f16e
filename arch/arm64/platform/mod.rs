//! Platform-specific support for ARM64
//!
//! Provides board identification and the per-board address map.

/// ARM Fixed Virtual Platforms (Foundation and Base models)
pub mod fvp;
