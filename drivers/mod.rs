//! Device drivers module
//!
//! Only what the boot path needs: a transmit-only console UART.

pub mod pl011;

pub use pl011::Pl011;
