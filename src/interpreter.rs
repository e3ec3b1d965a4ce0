use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::breakpoint::Breakpoints;
use crate::cpu::{Cpu, CpuConfig, Trap};
use crate::exec::IntExecutor;
use crate::isa::dcpu16::Dcpu16Decoder;
use crate::memory::{words_from_le_bytes, WordMemory};

/// Why `Interpreter::run` returned without a trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunExit {
    BudgetExhausted,
    Halted,
    Breakpoint(u16),
}

/// Owns the whole machine: registers, memory and breakpoints.
pub struct Interpreter {
    pub cpu: Cpu,
    pub mem: WordMemory,
    pub breakpoints: Breakpoints,
    dec: Dcpu16Decoder,
    exec: IntExecutor,
}

impl Interpreter {
    pub fn new(cfg: CpuConfig) -> Self {
        Self {
            cpu: Cpu::new(cfg),
            mem: WordMemory::new(cfg.memory_words),
            breakpoints: Breakpoints::new(),
            dec: Dcpu16Decoder::new(),
            exec: IntExecutor,
        }
    }

    /// Place `words` at the configured load address.
    pub fn load_words(&mut self, words: &[u16]) -> Result<()> {
        let base = self.cpu.cfg.load_address;
        self.mem.load(base, words)?;
        debug!(base, len = words.len(), "image loaded");
        Ok(())
    }

    /// Load a little-endian binary image.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.load_words(&words_from_le_bytes(bytes))
    }

    pub fn step(&mut self) -> Result<(), Trap> {
        self.cpu.step(&mut self.mem, &self.dec, &self.exec)
    }

    /// Run until a trap, a breakpoint, `halt` returning true, or `budget`
    /// steps have executed. With no budget the loop only ends on one of the
    /// other conditions. A breakpoint at the starting PC is ignored so that
    /// a stopped run can resume.
    pub fn run<H>(&mut self, budget: Option<u64>, mut halt: H) -> Result<RunExit, Trap>
    where
        H: FnMut(&Cpu, &WordMemory) -> bool,
    {
        let mut steps = 0u64;
        loop {
            if budget.is_some_and(|b| steps >= b) {
                return Ok(RunExit::BudgetExhausted);
            }
            if halt(&self.cpu, &self.mem) {
                return Ok(RunExit::Halted);
            }
            if steps > 0 && self.breakpoints.contains(self.cpu.pc) {
                return Ok(RunExit::Breakpoint(self.cpu.pc));
            }
            self.step()?;
            steps += 1;
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(CpuConfig::default())
    }
}
