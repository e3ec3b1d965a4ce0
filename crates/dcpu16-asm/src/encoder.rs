use dcpu16_rs::decoder::pack;
use dcpu16_rs::instructions::{lookup_prefix, Form, MNEMONIC_LEN};

use crate::context::{AssemblerContext, ListingLine};
use crate::error::{AsmError, AsmErrorKind};
use crate::normalize::normalize;

impl AssemblerContext {
    /// Assemble one raw source line (1-based `line`) into 1-3 words.
    pub fn assemble_line(&mut self, line: usize, raw: &str) -> Result<(), AsmError> {
        self.line = line;
        let n = normalize(raw);
        if let Some(name) = n.label {
            self.define_label(name);
        }
        if n.text.is_empty() {
            return Ok(());
        }
        let start = self.address();
        self.encode_instruction(&n.text)
            .map_err(|kind| AsmError::new(line, kind))?;
        self.listing.push(ListingLine {
            line,
            address: start,
            words: self.words[start as usize..].to_vec(),
            source: raw.trim().to_string(),
        });
        Ok(())
    }

    /// Opcode word first, then operand A's extra word, then operand B's.
    fn encode_instruction(&mut self, text: &str) -> Result<(), AsmErrorKind> {
        let desc = lookup_prefix(text).ok_or_else(|| AsmErrorKind::UnknownInstruction {
            line: text.to_string(),
        })?;
        let operands = &text[MNEMONIC_LEN..];

        let (at, word) = match desc.form {
            Form::Basic => {
                let (a, b) = operands
                    .split_once(',')
                    .ok_or(AsmErrorKind::MissingComma)?;
                let at = self.emit(0)? as usize;
                let a = self.encode_operand(a)?;
                let b = self.encode_operand(b)?;
                (at, pack(desc.code, a, b))
            }
            Form::NonBasic => {
                let at = self.emit(0)? as usize;
                let b = self.encode_operand(operands)?;
                (at, pack(0, desc.code, b))
            }
        };
        self.words[at] = word;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(src: &[&str]) -> Vec<u16> {
        let mut ctx = AssemblerContext::new();
        for (i, l) in src.iter().enumerate() {
            ctx.assemble_line(i + 1, l).unwrap();
        }
        ctx.words
    }

    #[test]
    fn basic_forms() {
        assert_eq!(words(&["SET A, 0x30"]), vec![0x7C01, 0x0030]);
        assert_eq!(words(&["SET [0x1000], 0x20"]), vec![0x7DE1, 0x1000, 0x0020]);
        assert_eq!(words(&["SUB A, [0x1000]"]), vec![0x7803, 0x1000]);
        assert_eq!(words(&["IFN A, 0x10"]), vec![0xC00D]);
        assert_eq!(words(&["SET I, 10"]), vec![0xA861]);
        assert_eq!(words(&["SET [0x2000+I], [A]"]), vec![0x2161, 0x2000]);
        assert_eq!(words(&["SHL X, 4"]), vec![0x9037]);
    }

    #[test]
    fn jsr_uses_extended_form() {
        assert_eq!(words(&["JSR 0x40"]), vec![0x7C10, 0x0040]);
        assert_eq!(words(&["JSR 0x18"]), vec![0xE010]);
        assert_eq!(words(&["jsr a"]), vec![0x0010]);
    }

    #[test]
    fn label_operand_reserves_slot() {
        let mut ctx = AssemblerContext::new();
        ctx.assemble_line(1, "SET [0x1000], later").unwrap();
        assert_eq!(ctx.words, vec![0x7DE1, 0x1000, 0x0000]);
        assert_eq!(ctx.refs.len(), 1);
        assert_eq!(ctx.refs[0].address, 2);
        assert_eq!(ctx.refs[0].name, "LATER");
    }

    #[test]
    fn errors_carry_line_numbers() {
        let mut ctx = AssemblerContext::new();
        ctx.assemble_line(1, "SET A, 1").unwrap();
        let err = ctx.assemble_line(2, "SET A 1").unwrap_err();
        assert_eq!(err, AsmError::new(2, AsmErrorKind::MissingComma));

        let err = ctx.assemble_line(3, "NOP").unwrap_err();
        assert!(matches!(err.kind, AsmErrorKind::UnknownInstruction { .. }));
        assert_eq!(err.to_string(), "unrecognised instruction `NOP` on line 3");
    }
}
