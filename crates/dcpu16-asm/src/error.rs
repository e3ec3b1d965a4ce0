/// What went wrong on a source line. Every kind aborts the assembly run.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmErrorKind {
    #[error("bracket mismatch in `{token}`")]
    BracketMismatch { token: String },
    #[error("invalid literal digit in `{token}`")]
    InvalidLiteralDigit { token: String },
    #[error("literal `{token}` does not fit in 16 bits")]
    LiteralOverflow { token: String },
    #[error("unknown register `{name}`")]
    UnknownRegister { name: String },
    #[error("empty operand")]
    EmptyOperand,
    #[error("unrecognised instruction `{line}`")]
    UnknownInstruction { line: String },
    #[error("missing comma")]
    MissingComma,
    #[error("program exceeds the 16-bit address space")]
    ProgramTooLarge,
    #[error("unresolved label `{name}`")]
    UnresolvedLabel { name: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} on line {line}")]
pub struct AsmError {
    /// 1-based source line.
    pub line: usize,
    pub kind: AsmErrorKind,
}

impl AsmError {
    pub fn new(line: usize, kind: AsmErrorKind) -> Self {
        Self { line, kind }
    }
}
