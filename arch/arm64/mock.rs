//! Test doubles for the register and table builder collaborators

use crate::arch::arm64::cpu::sysreg::{IdRegisters, MmuRegisters};
use crate::arch::arm64::mmu::{MemLayout, Region, TableBuilder, TableRoot};
use crate::arch::arm64::ExceptionLevel;

/// One observable register operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegOp {
    Mair(u64),
    Tcr(u64),
    Ttbr0(u64),
    Sctlr(u64),
    TlbiAllE3,
    TlbiVmallE1,
    DcacheCleanInvalidateAll,
}

/// Translation registers that remember their values and every operation
#[derive(Debug, Clone)]
pub struct RecordingMmu {
    pub el: ExceptionLevel,
    pub mair: u64,
    pub tcr: u64,
    pub ttbr0: u64,
    pub sctlr: u64,
    pub log: Vec<RegOp>,
}

impl RecordingMmu {
    pub fn at(el: ExceptionLevel) -> Self {
        Self { el, mair: 0, tcr: 0, ttbr0: 0, sctlr: 0, log: Vec::new() }
    }

    /// Start from a non-zero SCTLR (reset value with RES1 bits)
    pub fn with_sctlr(mut self, sctlr: u64) -> Self {
        self.sctlr = sctlr;
        self
    }

    pub fn count(&self, op: RegOp) -> usize {
        self.log.iter().filter(|o| **o == op).count()
    }
}

impl MmuRegisters for RecordingMmu {
    fn current_el(&self) -> ExceptionLevel {
        self.el
    }

    fn write_mair(&mut self, value: u64) {
        self.mair = value;
        self.log.push(RegOp::Mair(value));
    }

    fn write_tcr(&mut self, value: u64) {
        self.tcr = value;
        self.log.push(RegOp::Tcr(value));
    }

    fn write_ttbr0(&mut self, value: u64) {
        self.ttbr0 = value;
        self.log.push(RegOp::Ttbr0(value));
    }

    fn read_sctlr(&self) -> u64 {
        self.sctlr
    }

    fn write_sctlr(&mut self, value: u64) {
        self.sctlr = value;
        self.log.push(RegOp::Sctlr(value));
    }

    fn tlbi_alle3(&mut self) {
        self.log.push(RegOp::TlbiAllE3);
    }

    fn tlbi_vmalle1(&mut self) {
        self.log.push(RegOp::TlbiVmallE1);
    }

    fn dcache_clean_invalidate_all(&mut self) {
        self.log.push(RegOp::DcacheCleanInvalidateAll);
    }
}

/// Fixed identification words
#[derive(Debug, Clone, Copy)]
pub struct FakeIdRegs {
    pub sys_id: u32,
    pub midr: u64,
}

impl IdRegisters for FakeIdRegs {
    fn read_sys_id(&self) -> u32 {
        self.sys_id
    }

    fn read_midr(&self) -> u64 {
        self.midr
    }
}

/// Table builder returning a preset root and recording its inputs
#[derive(Debug, Clone)]
pub struct FakeTableBuilder {
    pub root: u64,
    pub calls: usize,
    pub last: Option<(MemLayout, Region, Region)>,
}

impl FakeTableBuilder {
    pub fn returning(root: u64) -> Self {
        Self { root, calls: 0, last: None }
    }
}

impl TableBuilder for FakeTableBuilder {
    fn fill_xlation_tables(&mut self, layout: &MemLayout, ro: Region, coh: Region) -> TableRoot {
        self.calls += 1;
        self.last = Some((*layout, ro, coh));
        TableRoot::new(self.root)
    }
}
