use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Set,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    And,
    Bor,
    Xor,
    Ife,
    Ifn,
    Ifg,
    Ifb,
    // non-basic
    Jsr,
}

impl Op {
    pub fn is_basic(self) -> bool {
        !matches!(self, Op::Jsr)
    }
}

/// One instruction word split into fields. `a` and `b` are raw 6-bit operand codes;
/// for non-basic ops `a` is zero and the single operand lives in `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub op: Op,
    pub a: u8,
    pub b: u8,
    pub raw: u16,
}

pub trait Decoder {
    fn decode(&self, raw: u16) -> Option<Decoded>;
}

/// Field layout of an instruction word: `bbbbbbaaaaaaoooo`.
pub fn fields(raw: u16) -> (u8, u8, u8) {
    let opcode = (raw & 0xF) as u8;
    let a = ((raw >> 4) & 0x3F) as u8;
    let b = ((raw >> 10) & 0x3F) as u8;
    (opcode, a, b)
}

pub fn pack(opcode: u8, a: u8, b: u8) -> u16 {
    ((b as u16 & 0x3F) << 10) | ((a as u16 & 0x3F) << 4) | (opcode as u16 & 0xF)
}
