//! Operand resolution: turning operand descriptors into values and
//! writing values back through the storage collaborators.

use asmboy_common::{Label, Operand, Word};

use super::bus::{Board, Memory, RegisterStore};
use crate::error::{Error, Result};

impl<M: Memory, R: RegisterStore, A, C> Board<M, R, A, C> {
    /// Current value of `operand`.
    ///
    /// An indirect address resolves its index operand first and reads the
    /// cell at `offset + index`. A label resolves to its program location.
    pub fn resolve(&mut self, operand: &Operand) -> Result<Word> {
        match operand {
            Operand::Constant(value) => Ok(*value),
            Operand::Register(register) => self.registers.get(register),
            Operand::Address(address) => self.memory.get(address),
            Operand::IndirectAddress(address) => {
                let shift = self.resolve(&address.index)?;
                self.memory.get(&address.shifted(shift))
            }
            Operand::Label(label) => Ok(label.value),
        }
    }

    /// Store `value` into `operand`. Constants and labels are read-only.
    pub fn write(&mut self, operand: &Operand, value: Word) -> Result<()> {
        match operand {
            Operand::Register(register) => self.registers.set(register, value),
            Operand::Address(address) => self.memory.set(address, value),
            Operand::IndirectAddress(address) => {
                let shift = self.resolve(&address.index)?;
                self.memory.set(&address.shifted(shift), value)
            }
            Operand::Constant(value) | Operand::Label(Label { value, .. }) => {
                Err(Error::NotWriteable(*value))
            }
        }
    }
}

/// Whether fetching `b` after `a` has to wait for the same bus.
///
/// Two memory-class operands (direct or indirect addresses) share the
/// memory bus, two registers share the register bus. Constants and labels
/// never contend.
#[inline]
pub fn shares_bus(a: &Operand, b: &Operand) -> bool {
    (a.is_memory() && b.is_memory()) || (a.is_register() && b.is_register())
}
