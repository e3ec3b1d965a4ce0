use anyhow::Error;
use crate::decoder::{fields, Decoder};
use crate::exec::Executor;
use crate::memory::{Bus, ADDRESS_SPACE};
use crate::operand::{Operand, Reg};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuConfig {
    pub memory_words: usize,
    pub load_address: u16, // where the image is placed and PC starts
    pub initial_sp: u16,   // stack grows downward from here
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            memory_words: ADDRESS_SPACE,
            load_address: 0,
            initial_sp: 0xFFFF,
        }
    }
}

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status: u8 {
const SKIP = 1 << 0; // next instruction is consumed without executing
}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cpu {
    pub regs: [u16; 8], // A B C X Y Z I J, indexed by Reg
    pub pc: u16,
    pub sp: u16,
    pub o: u16,
    pub status: Status,
    pub cycles: u64,
    pub cfg: CpuConfig,
}

#[derive(thiserror::Error, Debug)]
pub enum Trap {
    #[error("Invalid opcode {word:#06x} at {pc:#06x}")]
    InvalidOpcode { pc: u16, word: u16 },
    #[error("Address {addr:#06x} out of range: {source}")]
    AddressOutOfRange { addr: u16, #[source] source: Error },
}

impl Cpu {
    pub fn new(cfg: CpuConfig) -> Self {
        Self {
            regs: [0; 8],
            pc: cfg.load_address,
            sp: cfg.initial_sp,
            o: 0,
            status: Status::empty(),
            cycles: 0,
            cfg,
        }
    }

    pub fn reset(&mut self, reset_pc: u16) {
        *self = Self::new(self.cfg);
        self.pc = reset_pc;
    }

    pub fn reg(&self, r: Reg) -> u16 {
        self.regs[r as usize]
    }

    pub fn set_reg(&mut self, r: Reg, val: u16) {
        self.regs[r as usize] = val;
    }

    pub fn skip_pending(&self) -> bool {
        self.status.contains(Status::SKIP)
    }

    /// One fetch-decode-execute cycle. A pending skip consumes the whole
    /// instruction (opcode word plus operand words) without side effects.
    pub fn step<B: Bus, D: Decoder, X: Executor>(
        &mut self,
        bus: &mut B,
        dec: &D,
        exec: &X,
    ) -> Result<(), Trap> {
        let pc = self.pc;
        let raw = self.next_word(bus)?;
        self.cycles += 1;

        if self.skip_pending() {
            self.status.remove(Status::SKIP);
            let len = instruction_extra_words(raw);
            self.pc = self.pc.wrapping_add(len);
            trace!(pc, raw, len, "skip");
            return Ok(());
        }

        let d = dec.decode(raw).ok_or(Trap::InvalidOpcode { pc, word: raw })?;
        trace!(pc, raw, op = ?d.op, regs = ?self.regs, sp = self.sp, o = self.o, "exec");
        exec.exec(self, bus, d)
    }

    /// Read the word at PC and advance PC.
    pub fn next_word<B: Bus>(&mut self, bus: &mut B) -> Result<u16, Trap> {
        let addr = self.pc;
        let w = read(bus, addr)?;
        self.pc = addr.wrapping_add(1);
        Ok(w)
    }

    pub fn push<B: Bus>(&mut self, bus: &mut B, val: u16) -> Result<(), Trap> {
        self.sp = self.sp.wrapping_sub(1);
        write(bus, self.sp, val)
    }
}

/// Operand words following the opcode word, from the raw field layout alone.
pub fn instruction_extra_words(raw: u16) -> u16 {
    let (opcode, a, b) = fields(raw);
    let b_len = Operand::from_code(b).extra_words();
    if opcode == 0 {
        b_len
    } else {
        Operand::from_code(a).extra_words() + b_len
    }
}

pub(crate) fn read<B: Bus>(bus: &mut B, addr: u16) -> Result<u16, Trap> {
    bus.read_word(addr)
        .map_err(|source| Trap::AddressOutOfRange { addr, source })
}

pub(crate) fn write<B: Bus>(bus: &mut B, addr: u16, val: u16) -> Result<(), Trap> {
    bus.write_word(addr, val)
        .map_err(|source| Trap::AddressOutOfRange { addr, source })
}
