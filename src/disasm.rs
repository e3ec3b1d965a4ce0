use crate::cpu::{instruction_extra_words, Cpu};
use crate::decoder::{fields, Decoded, Decoder};
use crate::instructions::by_op;
use crate::operand::{Operand, Reg};

/// Render one operand. `next` supplies the following instruction word for
/// modes that take one.
pub fn fmt_operand(op: Operand, next: Option<u16>) -> String {
    let w = next.unwrap_or(0);
    match op {
        Operand::Register(r) => r.to_string(),
        Operand::RegisterIndirect(r) => format!("[{r}]"),
        Operand::RegisterOffset(r) => format!("[{w:#06x}+{r}]"),
        Operand::Pop => "POP".into(),
        Operand::Peek => "PEEK".into(),
        Operand::Push => "PUSH".into(),
        Operand::Sp => "SP".into(),
        Operand::Pc => "PC".into(),
        Operand::O => "O".into(),
        Operand::NextWordIndirect => format!("[{w:#06x}]"),
        Operand::NextWordLiteral => format!("{w:#06x}"),
        Operand::Literal(v) => format!("{v:#x}"),
    }
}

/// Format a decoded instruction whose operand words follow in `rest`.
pub fn fmt_decoded(d: &Decoded, rest: &[u16]) -> String {
    let mnemonic = by_op(d.op).mnemonic;
    let mut words = rest.iter().copied();
    if !d.op.is_basic() {
        let b = Operand::from_code(d.b);
        let wb = if b.extra_words() > 0 { words.next() } else { None };
        return format!("{mnemonic} {}", fmt_operand(b, wb));
    }
    let a = Operand::from_code(d.a);
    let wa = if a.extra_words() > 0 { words.next() } else { None };
    let b = Operand::from_code(d.b);
    let wb = if b.extra_words() > 0 { words.next() } else { None };
    format!("{mnemonic} {}, {}", fmt_operand(a, wa), fmt_operand(b, wb))
}

/// Disassemble the instruction at the start of `words`. Returns the text and
/// the instruction length in words. Undecodable words render as `DAT`.
pub fn disassemble<D: Decoder>(dec: &D, words: &[u16]) -> Option<(String, usize)> {
    let raw = *words.first()?;
    let len = 1 + instruction_extra_words(raw) as usize;
    match dec.decode(raw) {
        Some(d) => Some((fmt_decoded(&d, &words[1..len.min(words.len())]), len)),
        None => {
            let (opcode, a, b) = fields(raw);
            Some((format!("DAT {raw:#06x} ; op={opcode:#x} a={a:#04x} b={b:#04x}"), 1))
        }
    }
}

pub fn fmt_registers(cpu: &Cpu) -> String {
    let mut s = String::new();
    for r in Reg::ALL {
        s.push_str(&format!("{r}={:04x} ", cpu.reg(r)));
    }
    s.push_str(&format!("PC={:04x} SP={:04x} O={:04x}", cpu.pc, cpu.sp, cpu.o));
    if cpu.skip_pending() {
        s.push_str(" skip");
    }
    s
}
