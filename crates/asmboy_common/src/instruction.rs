use std::fmt;

use crate::operand::Operand;

/// One program line as produced by the assembler.
///
/// When `sub` is non-empty the instruction is a pure container: the engine
/// runs every sub-instruction in order and never dispatches on `name`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instruction {
    pub name: String,
    pub operands: Vec<Operand>,
    pub sub: Vec<Instruction>,
}

impl Instruction {
    pub fn new(name: impl Into<String>, operands: Vec<Operand>) -> Self {
        Instruction {
            name: name.into(),
            operands,
            sub: Vec::new(),
        }
    }

    /// Composite instruction grouping `sub` under a single program slot.
    pub fn composite(name: impl Into<String>, sub: Vec<Instruction>) -> Self {
        Instruction {
            name: name.into(),
            operands: Vec::new(),
            sub,
        }
    }

    #[inline]
    pub fn is_composite(&self) -> bool {
        !self.sub.is_empty()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.to_ascii_uppercase())?;
        for (i, operand) in self.operands.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{operand}")?;
        }
        if self.is_composite() {
            write!(f, " {{")?;
            for (i, sub) in self.sub.iter().enumerate() {
                let sep = if i == 0 { " " } else { "; " };
                write!(f, "{sep}{sub}")?;
            }
            write!(f, " }}")?;
        }
        Ok(())
    }
}
