use std::fmt;

use crate::Word;

/// A named general-purpose register slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Register(pub String);

impl Register {
    pub fn new(name: impl Into<String>) -> Self {
        Register(name.into())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direct memory location: a cell `offset` words into the region named
/// `label`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    pub label: String,
    pub offset: Word,
}

impl Address {
    pub fn new(label: impl Into<String>, offset: Word) -> Self {
        Address {
            label: label.into(),
            offset,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            0 => write!(f, "#{}", self.label),
            offset => write!(f, "#{}[{}]", self.label, offset),
        }
    }
}

/// Memory location whose effective offset is `offset + value(index)`.
///
/// `index` is expected to be a constant or a register; nesting another
/// indirect address resolves correctly but is not something an assembler
/// emits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndirectAddress {
    pub label: String,
    pub offset: Word,
    pub index: Box<Operand>,
}

impl IndirectAddress {
    pub fn new(label: impl Into<String>, offset: Word, index: Operand) -> Self {
        IndirectAddress {
            label: label.into(),
            offset,
            index: Box::new(index),
        }
    }

    /// Direct address once the index operand has been resolved to `shift`.
    pub fn shifted(&self, shift: Word) -> Address {
        Address {
            label: self.label.clone(),
            offset: self.offset.wrapping_add(shift),
        }
    }
}

impl fmt::Display for IndirectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            0 => write!(f, "#{}[{}]", self.label, self.index),
            offset => write!(f, "#{}[{}+{}]", self.label, offset, self.index),
        }
    }
}

/// Jump target already linked to a program location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label {
    pub name: String,
    pub value: Word,
}

impl Label {
    pub fn new(name: impl Into<String>, value: Word) -> Self {
        Label {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Instruction argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    Constant(Word),
    Register(Register),
    Address(Address),
    IndirectAddress(IndirectAddress),
    Label(Label),
}

impl Operand {
    pub fn constant(value: Word) -> Self {
        Operand::Constant(value)
    }

    pub fn register(name: impl Into<String>) -> Self {
        Operand::Register(Register::new(name))
    }

    pub fn address(label: impl Into<String>, offset: Word) -> Self {
        Operand::Address(Address::new(label, offset))
    }

    pub fn indirect(label: impl Into<String>, offset: Word, index: Operand) -> Self {
        Operand::IndirectAddress(IndirectAddress::new(label, offset, index))
    }

    pub fn label(name: impl Into<String>, value: Word) -> Self {
        Operand::Label(Label::new(name, value))
    }

    /// Memory-class operands travel over the memory bus.
    #[inline]
    pub fn is_memory(&self) -> bool {
        matches!(self, Operand::Address(_) | Operand::IndirectAddress(_))
    }

    #[inline]
    pub fn is_register(&self) -> bool {
        matches!(self, Operand::Register(_))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Constant(value) => write!(f, "{value}"),
            Operand::Register(register) => register.fmt(f),
            Operand::Address(address) => address.fmt(f),
            Operand::IndirectAddress(address) => address.fmt(f),
            Operand::Label(label) => label.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_classes() {
        assert!(Operand::address("data", 0).is_memory());
        assert!(Operand::indirect("data", 1, Operand::register("A")).is_memory());
        assert!(Operand::register("A").is_register());
        assert!(!Operand::constant(3).is_memory());
        assert!(!Operand::label("loop", 4).is_register());
    }

    #[test]
    fn indirect_shift_adds_to_base_offset() {
        let address = IndirectAddress::new("data", 2, Operand::constant(0));
        assert_eq!(address.shifted(3), Address::new("data", 5));
        assert_eq!(address.shifted(-2), Address::new("data", 0));
    }

    #[test]
    fn display_uses_assembly_notation() {
        assert_eq!(Operand::constant(-7).to_string(), "-7");
        assert_eq!(Operand::address("STDOUT", 0).to_string(), "#STDOUT");
        assert_eq!(Operand::address("data", 3).to_string(), "#data[3]");
        assert_eq!(
            Operand::indirect("data", 1, Operand::register("B")).to_string(),
            "#data[1+B]"
        );
        assert_eq!(Operand::label("end", 9).to_string(), "end");
    }
}
