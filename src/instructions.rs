use crate::decoder::Op;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// Two operands, opcode in the low nibble.
    Basic,
    /// One operand, opcode nibble zero, extended opcode in the A field.
    NonBasic,
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub form: Form,
    /// Basic opcode nibble, or the extended opcode for non-basic forms.
    pub code: u8,
}

const fn basic(op: Op, mnemonic: &'static str, code: u8) -> InstrDesc {
    InstrDesc { op, mnemonic, form: Form::Basic, code }
}

pub const TABLE: &[InstrDesc] = &[
    basic(Op::Set, "SET", 0x1),
    basic(Op::Add, "ADD", 0x2),
    basic(Op::Sub, "SUB", 0x3),
    basic(Op::Mul, "MUL", 0x4),
    basic(Op::Div, "DIV", 0x5),
    basic(Op::Mod, "MOD", 0x6),
    basic(Op::Shl, "SHL", 0x7),
    basic(Op::Shr, "SHR", 0x8),
    basic(Op::And, "AND", 0x9),
    basic(Op::Bor, "BOR", 0xA),
    basic(Op::Xor, "XOR", 0xB),
    basic(Op::Ife, "IFE", 0xC),
    basic(Op::Ifn, "IFN", 0xD),
    basic(Op::Ifg, "IFG", 0xE),
    basic(Op::Ifb, "IFB", 0xF),
    InstrDesc {
        op: Op::Jsr,
        mnemonic: "JSR",
        form: Form::NonBasic,
        code: 0x1,
    },
];

/// Every mnemonic is three letters.
pub const MNEMONIC_LEN: usize = 3;

/// Match the leading mnemonic of an upper-cased line.
pub fn lookup_prefix(line: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| line.starts_with(d.mnemonic))
}

pub fn by_op(op: Op) -> &'static InstrDesc {
    // TABLE covers every Op variant
    TABLE
        .iter()
        .find(|d| d.op == op)
        .unwrap_or(&TABLE[0])
}

pub fn basic_by_code(code: u8) -> Option<&'static InstrDesc> {
    TABLE
        .iter()
        .find(|d| d.form == Form::Basic && d.code == code)
}

pub fn non_basic_by_code(code: u8) -> Option<&'static InstrDesc> {
    TABLE
        .iter()
        .find(|d| d.form == Form::NonBasic && d.code == code)
}
