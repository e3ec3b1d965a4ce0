use serde::Serialize;
use tracing::{debug, warn};

use crate::context::{AssemblerContext, LabelRef};
use crate::error::{AsmError, AsmErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patch {
    pub name: String,
    /// Word slot that was rewritten.
    pub slot: u16,
    /// Label address written into it.
    pub target: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    pub patched: Vec<Patch>,
    /// References with no matching label; their slots keep the 0 placeholder.
    pub unresolved: Vec<LabelRef>,
}

impl AssemblerContext {
    /// Second pass: write each referenced label's address into its slot.
    /// The first label with a matching name wins. Unresolved references are
    /// reported, or rejected when `strict` is set.
    pub fn link(&mut self, strict: bool) -> Result<LinkReport, AsmError> {
        let mut report = LinkReport::default();
        for r in &self.refs {
            match self.labels.iter().find(|l| l.name == r.name) {
                Some(label) => {
                    self.words[r.address as usize] = label.address;
                    debug!(name = %r.name, slot = r.address, target = label.address, "linked");
                    report.patched.push(Patch {
                        name: r.name.clone(),
                        slot: r.address,
                        target: label.address,
                    });
                }
                None if strict => {
                    return Err(AsmError::new(
                        r.line,
                        AsmErrorKind::UnresolvedLabel { name: r.name.clone() },
                    ));
                }
                None => {
                    warn!(name = %r.name, line = r.line, "unresolved label left as 0");
                    report.unresolved.push(r.clone());
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(src: &str) -> AssemblerContext {
        let mut ctx = AssemblerContext::new();
        for (i, l) in src.lines().enumerate() {
            ctx.assemble_line(i + 1, l).unwrap();
        }
        ctx
    }

    #[test]
    fn first_definition_wins() {
        let mut c = ctx("SET PC, dup\n:dup SET A, 1\n:dup SET A, 2\n");
        let report = c.link(false).unwrap();
        assert_eq!(report.patched[0].target, 2);
        assert_eq!(c.words[1], 2);
    }

    #[test]
    fn unresolved_is_reported_or_fatal() {
        let mut lax = ctx("SET A, nowhere\n");
        let report = lax.link(false).unwrap();
        assert_eq!(report.unresolved.len(), 1);
        assert_eq!(lax.words, vec![0x7C01, 0]);

        let mut strict = ctx("SET A, 1\nSET A, nowhere\n");
        let err = strict.link(true).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, AsmErrorKind::UnresolvedLabel { name: "NOWHERE".into() });
    }
}
