pub mod context;
pub mod encoder;
pub mod error;
pub mod linker;
pub mod normalize;
pub mod operand;

// Re-export commonly used types for the CLI and tests
pub use context::{AssemblerContext, Label, LabelRef, ListingLine};
pub use error::{AsmError, AsmErrorKind};
pub use linker::{LinkReport, Patch};

use dcpu16_rs::memory::words_to_le_bytes;

#[derive(Debug, Clone, Copy, Default)]
pub struct AsmOptions {
    /// Treat references to undefined labels as errors.
    pub strict: bool,
}

/// A linked program image plus what the assembler learned building it.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub words: Vec<u16>,
    pub labels: Vec<Label>,
    pub listing: Vec<ListingLine>,
    pub link: LinkReport,
}

impl Assembly {
    /// Little-endian image, two bytes per word.
    pub fn to_bytes(&self) -> Vec<u8> {
        words_to_le_bytes(&self.words)
    }
}

/// Assemble and link a whole source text. Stops at the first error.
pub fn assemble(source: &str, opts: AsmOptions) -> Result<Assembly, AsmError> {
    let mut ctx = AssemblerContext::new();
    for (i, line) in source.lines().enumerate() {
        ctx.assemble_line(i + 1, line)?;
    }
    let link = ctx.link(opts.strict)?;
    Ok(Assembly {
        words: ctx.words,
        labels: ctx.labels,
        listing: ctx.listing,
        link,
    })
}
