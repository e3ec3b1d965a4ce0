//! Interpreter side of the operand codec: turn a 6-bit code into a storage
//! location, consuming instruction words and moving SP as the mode requires.

use crate::cpu::{read, write, Cpu, Trap};
use crate::memory::Bus;
use crate::operand::{Operand, Reg};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Register(Reg),
    Sp,
    Pc,
    O,
    Memory(u16),
    /// Read-only value; stores are discarded.
    Literal(u16),
}

impl Cpu {
    /// Operand A must be resolved before operand B so that B reads its
    /// next word from where A left PC.
    pub fn resolve<B: Bus>(&mut self, bus: &mut B, code: u8) -> Result<Location, Trap> {
        let loc = match Operand::from_code(code) {
            Operand::Register(r) => Location::Register(r),
            Operand::RegisterIndirect(r) => Location::Memory(self.reg(r)),
            Operand::RegisterOffset(r) => {
                let w = self.next_word(bus)?;
                Location::Memory(self.reg(r).wrapping_add(w))
            }
            Operand::Pop => {
                let addr = self.sp;
                self.sp = self.sp.wrapping_add(1);
                Location::Memory(addr)
            }
            Operand::Peek => Location::Memory(self.sp),
            Operand::Push => {
                self.sp = self.sp.wrapping_sub(1);
                Location::Memory(self.sp)
            }
            Operand::Sp => Location::Sp,
            Operand::Pc => Location::Pc,
            Operand::O => Location::O,
            Operand::NextWordIndirect => Location::Memory(self.next_word(bus)?),
            Operand::NextWordLiteral => Location::Literal(self.next_word(bus)?),
            Operand::Literal(v) => Location::Literal(v),
        };
        Ok(loc)
    }

    pub fn load<B: Bus>(&self, bus: &mut B, loc: Location) -> Result<u16, Trap> {
        match loc {
            Location::Register(r) => Ok(self.reg(r)),
            Location::Sp => Ok(self.sp),
            Location::Pc => Ok(self.pc),
            Location::O => Ok(self.o),
            Location::Memory(addr) => read(bus, addr),
            Location::Literal(v) => Ok(v),
        }
    }

    pub fn store<B: Bus>(&mut self, bus: &mut B, loc: Location, val: u16) -> Result<(), Trap> {
        match loc {
            Location::Register(r) => self.set_reg(r, val),
            Location::Sp => self.sp = val,
            Location::Pc => self.pc = val,
            Location::O => self.o = val,
            Location::Memory(addr) => write(bus, addr, val)?,
            Location::Literal(_) => {}
        }
        Ok(())
    }
}
