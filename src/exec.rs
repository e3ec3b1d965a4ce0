use crate::cpu::{Cpu, Status, Trap};
use crate::decoder::{Decoded, Op};
use crate::memory::Bus;

pub trait Executor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, d: Decoded) -> Result<(), Trap>;
}

/// Result of a basic op on two operand values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Write `value` to operand A; update O when `overflow` is set.
    Store { value: u16, overflow: Option<u16> },
    /// Conditional op; `false` arms the skip flag.
    Test(bool),
}

fn store(value: u32) -> Effect {
    Effect::Store { value: value as u16, overflow: None }
}

fn store_o(value: u32, overflow: u32) -> Effect {
    Effect::Store {
        value: value as u16,
        overflow: Some(overflow as u16),
    }
}

/// Arithmetic and test semantics of the basic ops.
pub fn alu(op: Op, a: u16, b: u16) -> Effect {
    let (a32, b32) = (a as u32, b as u32);
    match op {
        Op::Set => store(b32),
        Op::Add => {
            let sum = a32 + b32;
            store_o(sum, (sum > 0xFFFF) as u32)
        }
        Op::Sub => {
            if a < b {
                // borrow: store the magnitude, O all ones
                store_o(b32 - a32, 0xFFFF)
            } else {
                store_o(a32 - b32, 0)
            }
        }
        Op::Mul => {
            let product = a32 * b32;
            store_o(product, product >> 16)
        }
        Op::Div => {
            if b == 0 {
                store_o(0, 0)
            } else {
                store_o(a32 / b32, (a32 << 16) / b32)
            }
        }
        Op::Mod => {
            if b == 0 {
                store(0)
            } else {
                store(a32 % b32)
            }
        }
        Op::Shl => {
            let wide = (a32 as u64).checked_shl(b32).unwrap_or(0);
            store_o(wide as u32, (wide >> 16) as u32)
        }
        Op::Shr => {
            let shifted = a32.checked_shr(b32).unwrap_or(0);
            store_o(shifted, (a32 << 16).checked_shr(b32).unwrap_or(0))
        }
        Op::And => store(a32 & b32),
        Op::Bor => store(a32 | b32),
        Op::Xor => store(a32 ^ b32),
        Op::Ife => Effect::Test(a == b),
        Op::Ifn => Effect::Test(a != b),
        Op::Ifg => Effect::Test(a > b),
        Op::Ifb => Effect::Test(a & b != 0),
        // non-basic ops never reach the ALU
        Op::Jsr => store(a32),
    }
}

pub struct IntExecutor;
impl Executor for IntExecutor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, d: Decoded) -> Result<(), Trap> {
        if let Op::Jsr = d.op {
            // resolve first so the pushed return address is past any operand word
            let target = cpu.resolve(bus, d.b)?;
            let target = cpu.load(bus, target)?;
            let ret = cpu.pc;
            cpu.push(bus, ret)?;
            cpu.pc = target;
            return Ok(());
        }

        let dst = cpu.resolve(bus, d.a)?;
        let src = cpu.resolve(bus, d.b)?;
        let a = if d.op == Op::Set { 0 } else { cpu.load(bus, dst)? };
        let b = cpu.load(bus, src)?;

        match alu(d.op, a, b) {
            Effect::Store { value, overflow } => {
                cpu.store(bus, dst, value)?;
                if let Some(o) = overflow {
                    cpu.o = o;
                }
            }
            Effect::Test(true) => {}
            Effect::Test(false) => cpu.status.insert(Status::SKIP),
        }
        Ok(())
    }
}
