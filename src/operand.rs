//! 6-bit operand codes shared by the assembler (encode) and the interpreter (decode).
//!
//! Code ranges:
//!
//! | code        | meaning                               | extra word |
//! |-------------|---------------------------------------|------------|
//! | 0x00..=0x07 | register                              | no         |
//! | 0x08..=0x0F | `[register]`                          | no         |
//! | 0x10..=0x17 | `[next word + register]`              | yes        |
//! | 0x18        | POP                                   | no         |
//! | 0x19        | PEEK                                  | no         |
//! | 0x1A        | PUSH                                  | no         |
//! | 0x1B        | SP                                    | no         |
//! | 0x1C        | PC                                    | no         |
//! | 0x1D        | O                                     | no         |
//! | 0x1E        | `[next word]`                         | yes        |
//! | 0x1F        | next word (literal)                   | yes        |
//! | 0x20..=0x3F | inline literal `code - 0x20`          | no         |

use serde::{Deserialize, Serialize};
use std::fmt;

pub const REGISTER_INDIRECT: u8 = 0x08;
pub const REGISTER_OFFSET: u8 = 0x10;
pub const POP: u8 = 0x18;
pub const PEEK: u8 = 0x19;
pub const PUSH: u8 = 0x1A;
pub const SP: u8 = 0x1B;
pub const PC: u8 = 0x1C;
pub const O: u8 = 0x1D;
pub const NEXT_WORD_INDIRECT: u8 = 0x1E;
pub const NEXT_WORD_LITERAL: u8 = 0x1F;
pub const INLINE_LITERAL: u8 = 0x20;

/// Largest value that fits in an inline literal operand.
pub const INLINE_LITERAL_MAX: u16 = 0x1F;

/// General purpose registers, in encoding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reg {
    A = 0,
    B = 1,
    C = 2,
    X = 3,
    Y = 4,
    Z = 5,
    I = 6,
    J = 7,
}

impl Reg {
    pub const ALL: [Reg; 8] = [Reg::A, Reg::B, Reg::C, Reg::X, Reg::Y, Reg::Z, Reg::I, Reg::J];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Reg> {
        Self::ALL.get(id as usize).copied()
    }

    /// Case-insensitive lookup by single-letter name.
    pub fn from_name(c: char) -> Option<Reg> {
        match c.to_ascii_uppercase() {
            'A' => Some(Reg::A),
            'B' => Some(Reg::B),
            'C' => Some(Reg::C),
            'X' => Some(Reg::X),
            'Y' => Some(Reg::Y),
            'Z' => Some(Reg::Z),
            'I' => Some(Reg::I),
            'J' => Some(Reg::J),
            _ => None,
        }
    }

    pub fn name(self) -> char {
        ['A', 'B', 'C', 'X', 'Y', 'Z', 'I', 'J'][self as usize]
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decoded addressing mode of one operand field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Register(Reg),
    RegisterIndirect(Reg),
    RegisterOffset(Reg),
    Pop,
    Peek,
    Push,
    Sp,
    Pc,
    O,
    NextWordIndirect,
    NextWordLiteral,
    Literal(u16),
}

impl Operand {
    /// Decode a 6-bit operand code. Bits above the low six are ignored.
    pub fn from_code(code: u8) -> Operand {
        let code = code & 0x3F;
        match code {
            0x00..=0x07 => Operand::Register(reg(code)),
            0x08..=0x0F => Operand::RegisterIndirect(reg(code - REGISTER_INDIRECT)),
            0x10..=0x17 => Operand::RegisterOffset(reg(code - REGISTER_OFFSET)),
            POP => Operand::Pop,
            PEEK => Operand::Peek,
            PUSH => Operand::Push,
            SP => Operand::Sp,
            PC => Operand::Pc,
            O => Operand::O,
            NEXT_WORD_INDIRECT => Operand::NextWordIndirect,
            NEXT_WORD_LITERAL => Operand::NextWordLiteral,
            _ => Operand::Literal((code - INLINE_LITERAL) as u16),
        }
    }

    /// Encode back to the 6-bit code. Inline literals above 0x1F are truncated.
    pub fn code(self) -> u8 {
        match self {
            Operand::Register(r) => r.id(),
            Operand::RegisterIndirect(r) => REGISTER_INDIRECT + r.id(),
            Operand::RegisterOffset(r) => REGISTER_OFFSET + r.id(),
            Operand::Pop => POP,
            Operand::Peek => PEEK,
            Operand::Push => PUSH,
            Operand::Sp => SP,
            Operand::Pc => PC,
            Operand::O => O,
            Operand::NextWordIndirect => NEXT_WORD_INDIRECT,
            Operand::NextWordLiteral => NEXT_WORD_LITERAL,
            Operand::Literal(v) => INLINE_LITERAL + (v as u8 & 0x1F),
        }
    }

    /// Number of instruction words this operand consumes after the opcode word.
    pub fn extra_words(self) -> u16 {
        match self {
            Operand::RegisterOffset(_) | Operand::NextWordIndirect | Operand::NextWordLiteral => 1,
            _ => 0,
        }
    }

    /// Reserved operand keywords, in match order.
    pub fn keyword(word: &str) -> Option<Operand> {
        KEYWORDS
            .iter()
            .find(|(kw, _)| word.starts_with(kw))
            .map(|&(_, op)| op)
    }
}

// Prefix-matched in this order.
const KEYWORDS: &[(&str, Operand)] = &[
    ("POP", Operand::Pop),
    ("PEEK", Operand::Peek),
    ("PUSH", Operand::Push),
    ("SP", Operand::Sp),
    ("PC", Operand::Pc),
    ("O", Operand::O),
];

fn reg(id: u8) -> Reg {
    // callers only pass 0..=7
    Reg::ALL[(id & 0x7) as usize]
}
