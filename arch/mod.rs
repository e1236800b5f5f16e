//! Architecture support
//!
//! Register programming logic lives in `arm64` and is written against the
//! collaborator traits in `arm64::cpu::sysreg`, so it also builds on the host
//! for unit tests. Only the hardware accessors are gated on `aarch64`.

pub mod arm64;
pub mod cpu;

pub use cpu::park_cpu;
