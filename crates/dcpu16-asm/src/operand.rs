//! Assembler side of the operand codec: one textual operand to a 6-bit code.

use dcpu16_rs::operand::{
    Operand, Reg, INLINE_LITERAL, INLINE_LITERAL_MAX, NEXT_WORD_INDIRECT, NEXT_WORD_LITERAL,
    REGISTER_INDIRECT, REGISTER_OFFSET,
};

use crate::error::AsmErrorKind;

/// Parsed operand, before label references get a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandToken {
    /// Fully encoded: 6-bit code plus optional extra word.
    Code { code: u8, extra: Option<u16> },
    /// Symbolic reference; needs a placeholder word patched at link time.
    Label { name: String, indirect: bool },
}

impl OperandToken {
    fn code(code: u8) -> Self {
        OperandToken::Code { code, extra: None }
    }
}

/// Classify and encode one operand token (already normalized, no whitespace).
pub fn parse_operand(token: &str) -> Result<OperandToken, AsmErrorKind> {
    let open = token.starts_with('[');
    let close = token.len() > open as usize && token.ends_with(']');
    if open != close {
        return Err(AsmErrorKind::BracketMismatch { token: token.into() });
    }
    let inner = if open { &token[1..token.len() - 1] } else { token };
    if inner.is_empty() {
        return Err(AsmErrorKind::EmptyOperand);
    }

    if starts_with_digit(inner) {
        return literal(inner, open, token);
    }
    if open {
        // [reg+literal]
        if let Some((reg, num)) = inner.split_once('+') {
            if single_register(reg).is_some() && starts_with_digit(num) {
                return literal(&format!("{num}+{reg}"), true, token);
            }
        }
    }

    if let Some(r) = single_register(inner) {
        let code = if open { REGISTER_INDIRECT + r.id() } else { r.id() };
        return Ok(OperandToken::code(code));
    }
    if let Some(kw) = Operand::keyword(inner) {
        return Ok(OperandToken::code(kw.code()));
    }
    Ok(OperandToken::Label {
        name: inner.to_string(),
        indirect: open,
    })
}

fn starts_with_digit(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_digit())
}

fn single_register(s: &str) -> Option<Reg> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Reg::from_name(c),
        _ => None,
    }
}

/// Numeric operand, optionally `literal+reg` when bracketed.
fn literal(body: &str, bracketed: bool, token: &str) -> Result<OperandToken, AsmErrorKind> {
    let (digits, reg) = match body.split_once('+') {
        Some((digits, reg_name)) if bracketed => {
            let reg = single_register(reg_name).ok_or_else(|| AsmErrorKind::UnknownRegister {
                name: reg_name.to_string(),
            })?;
            (digits, Some(reg))
        }
        _ => (body, None),
    };
    let value = parse_number(digits, token)?;

    if !bracketed && value <= INLINE_LITERAL_MAX {
        return Ok(OperandToken::code(INLINE_LITERAL + value as u8));
    }
    let code = match (bracketed, reg) {
        (false, _) => NEXT_WORD_LITERAL,
        (true, None) => NEXT_WORD_INDIRECT,
        (true, Some(r)) => REGISTER_OFFSET + r.id(),
    };
    Ok(OperandToken::Code {
        code,
        extra: Some(value),
    })
}

/// Decimal, or hex with a `0x` prefix. Every character must be a digit of the radix.
pub fn parse_number(digits: &str, token: &str) -> Result<u16, AsmErrorKind> {
    let (radix, body) = match digits
        .strip_prefix("0X")
        .or_else(|| digits.strip_prefix("0x"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    if body.is_empty() {
        return Err(AsmErrorKind::InvalidLiteralDigit { token: token.into() });
    }
    let mut value: u32 = 0;
    for c in body.chars() {
        let digit = c
            .to_digit(radix)
            .ok_or_else(|| AsmErrorKind::InvalidLiteralDigit { token: token.into() })?;
        value = value * radix + digit;
        if value > u16::MAX as u32 {
            return Err(AsmErrorKind::LiteralOverflow { token: token.into() });
        }
    }
    Ok(value as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn code(token: &str) -> (u8, Option<u16>) {
        match parse_operand(token).unwrap() {
            OperandToken::Code { code, extra } => (code, extra),
            other => panic!("expected code for {token}, got {other:?}"),
        }
    }

    #[test]
    fn small_literals_are_inline() {
        for v in 0u16..=31 {
            assert_eq!(code(&v.to_string()), (0x20 + v as u8, None));
        }
        assert_eq!(code("0X1F"), (0x3F, None));
    }

    #[test]
    fn large_and_bracketed_literals_take_a_word() {
        assert_eq!(code("32"), (0x1F, Some(32)));
        assert_eq!(code("0XFFFF"), (0x1F, Some(0xFFFF)));
        assert_eq!(code("[0X1000]"), (0x1E, Some(0x1000)));
        assert_eq!(code("[5]"), (0x1E, Some(5)));
        assert_eq!(code("[0X2000+I]"), (0x16, Some(0x2000)));
        assert_eq!(code("[I+0X2000]"), (0x16, Some(0x2000)));
        assert_eq!(code("[10+A]"), (0x10, Some(10)));
    }

    #[test]
    fn registers_and_keywords() {
        assert_eq!(code("A"), (0x00, None));
        assert_eq!(code("J"), (0x07, None));
        assert_eq!(code("[B]"), (0x09, None));
        assert_eq!(code("POP"), (0x18, None));
        assert_eq!(code("PEEK"), (0x19, None));
        assert_eq!(code("PUSH"), (0x1A, None));
        assert_eq!(code("SP"), (0x1B, None));
        assert_eq!(code("PC"), (0x1C, None));
        assert_eq!(code("O"), (0x1D, None));
    }

    #[test]
    fn other_words_are_labels() {
        assert_eq!(
            parse_operand("LOOP").unwrap(),
            OperandToken::Label { name: "LOOP".into(), indirect: false }
        );
        assert_eq!(
            parse_operand("[DATA]").unwrap(),
            OperandToken::Label { name: "DATA".into(), indirect: true }
        );
    }

    #[test]
    fn malformed_operands() {
        assert!(matches!(parse_operand("[A"), Err(AsmErrorKind::BracketMismatch { .. })));
        assert!(matches!(parse_operand("A]"), Err(AsmErrorKind::BracketMismatch { .. })));
        assert!(matches!(parse_operand("["), Err(AsmErrorKind::BracketMismatch { .. })));
        assert!(matches!(parse_operand("12G"), Err(AsmErrorKind::InvalidLiteralDigit { .. })));
        assert!(matches!(parse_operand("0XZZ"), Err(AsmErrorKind::InvalidLiteralDigit { .. })));
        assert!(matches!(parse_operand("5+A"), Err(AsmErrorKind::InvalidLiteralDigit { .. })));
        assert!(matches!(parse_operand("[5+Q]"), Err(AsmErrorKind::UnknownRegister { .. })));
        assert!(matches!(parse_operand("70000"), Err(AsmErrorKind::LiteralOverflow { .. })));
        assert_eq!(parse_operand("[]"), Err(AsmErrorKind::EmptyOperand));
        assert_eq!(parse_operand(""), Err(AsmErrorKind::EmptyOperand));
    }
}
