use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use dcpu16_rs::memory::ADDRESS_SPACE;
use dcpu16_rs::operand::{NEXT_WORD_INDIRECT, NEXT_WORD_LITERAL};

use crate::error::AsmErrorKind;
use crate::operand::{parse_operand, OperandToken};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub address: u16,
}

/// A word slot waiting for a label's address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRef {
    pub name: String,
    /// Address of the extra word to patch.
    pub address: u16,
    /// 1-based source line of the use.
    pub line: usize,
}

/// Words emitted for one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLine {
    pub line: usize,
    pub address: u16,
    pub words: Vec<u16>,
    pub source: String,
}

/// State of one assembly run. The address counter is the length of the
/// emitted word stream, so every emitted word advances it by exactly one.
#[derive(Debug, Default)]
pub struct AssemblerContext {
    pub words: Vec<u16>,
    pub labels: Vec<Label>,
    pub refs: Vec<LabelRef>,
    pub listing: Vec<ListingLine>,
    pub(crate) line: usize,
}

impl AssemblerContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address the next emitted word will occupy.
    pub fn address(&self) -> u16 {
        self.words.len() as u16
    }

    /// Append one word, failing once the 16-bit address space is full.
    pub(crate) fn emit(&mut self, word: u16) -> Result<u16, AsmErrorKind> {
        if self.words.len() >= ADDRESS_SPACE {
            return Err(AsmErrorKind::ProgramTooLarge);
        }
        let addr = self.address();
        self.words.push(word);
        Ok(addr)
    }

    pub fn define_label(&mut self, name: String) {
        let address = self.address();
        if self.labels.iter().any(|l| l.name == name) {
            // the first definition keeps winning at link time
            warn!(name = %name, line = self.line, "label defined more than once");
        }
        debug!(name = %name, address, "label");
        self.labels.push(Label { name, address });
    }

    /// Encode one operand, appending its extra word (if any) to the stream.
    /// Label operands get a zero placeholder and a pending reference.
    pub fn encode_operand(&mut self, token: &str) -> Result<u8, AsmErrorKind> {
        match parse_operand(token)? {
            OperandToken::Code { code, extra } => {
                if let Some(w) = extra {
                    self.emit(w)?;
                }
                Ok(code)
            }
            OperandToken::Label { name, indirect } => {
                let address = self.emit(0)?;
                self.refs.push(LabelRef {
                    name,
                    address,
                    line: self.line,
                });
                Ok(if indirect { NEXT_WORD_INDIRECT } else { NEXT_WORD_LITERAL })
            }
        }
    }
}
