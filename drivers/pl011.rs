//! ARM PL011 UART, transmit side only
//!
//! The FVP models bring UART0 up already configured, so the boot console
//! never touches baud rate or line control.
//! Reference: ARM DDI 0183G - PrimeCell UART (PL011) Technical Reference Manual

use core::fmt;

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs};

register_bitfields! [u32,
    FR [
        /// Transmit FIFO full
        TXFF OFFSET(5) NUMBITS(1) [],
        /// UART busy transmitting
        BUSY OFFSET(3) NUMBITS(1) []
    ]
];

register_structs! {
    #[allow(non_snake_case)]
    pub Pl011Registers {
        (0x00 => DR: ReadWrite<u32>),
        (0x04 => _reserved0),
        (0x18 => FR: ReadOnly<u32, FR::Register>),
        (0x1C => @END),
    }
}

/// Memory mapped PL011
pub struct Pl011 {
    regs: &'static Pl011Registers,
}

impl Pl011 {
    /// # Safety
    /// `base` must be the address of a mapped PL011.
    pub unsafe fn new(base: usize) -> Self {
        Self {
            regs: &*(base as *const Pl011Registers),
        }
    }

    /// Queue one byte, waiting for FIFO space
    pub fn putc(&self, byte: u8) {
        while self.regs.FR.is_set(FR::TXFF) {
            core::hint::spin_loop();
        }
        self.regs.DR.set(byte as u32);
    }

    /// Wait until everything queued has left the UART
    pub fn flush(&self) {
        while self.regs.FR.is_set(FR::BUSY) {
            core::hint::spin_loop();
        }
    }
}

impl fmt::Write for Pl011 {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.putc(b'\r');
            }
            self.putc(byte);
        }
        Ok(())
    }
}
