use crate::decoder::{fields, Decoded, Decoder};
use crate::instructions::{basic_by_code, non_basic_by_code};

/// DCPU-16 v1.1 instruction decoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dcpu16Decoder;

impl Dcpu16Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for Dcpu16Decoder {
    fn decode(&self, raw: u16) -> Option<Decoded> {
        let (opcode, a, b) = fields(raw);
        if opcode == 0 {
            // non-basic: extended opcode sits in the A field, operand in B
            let desc = non_basic_by_code(a)?;
            return Some(Decoded { op: desc.op, a: 0, b, raw });
        }
        let desc = basic_by_code(opcode)?;
        Some(Decoded { op: desc.op, a, b, raw })
    }
}
