use asmboy_common::{Address, Register, Word};

use super::alu::{Flags, Reducer};
use crate::error::Result;

/// Addressable storage, including the character stream devices.
///
/// `get` takes `&mut self` because reading a stream source consumes it.
pub trait Memory {
    fn get(&mut self, address: &Address) -> Result<Word>;
    fn set(&mut self, address: &Address, value: Word) -> Result<()>;
}

/// Register file plus the instruction pointer.
pub trait RegisterStore {
    fn get(&self, register: &Register) -> Result<Word>;
    fn set(&mut self, register: &Register, value: Word) -> Result<()>;
    fn instruction_pointer(&self) -> Word;
    fn set_instruction_pointer(&mut self, value: Word);
}

/// Arithmetic unit that owns the Z/N condition flags.
pub trait FlagUnit {
    /// Apply `reducer` to `(a, b)` and update the flags from the result.
    ///
    /// Division and modulo by zero must fail with `Error::ZeroDivision`.
    fn operation(&mut self, reducer: Reducer, a: Word, b: Word) -> Result<Word>;
    fn flag(&self, flag: Flags) -> bool;
}

/// Cycle and instruction counter.
pub trait Clock {
    /// One cycle elapsed.
    fn tick(&mut self);
    /// One instruction retired.
    fn inst(&mut self);
}

/// The four collaborators an instruction controller drives.
#[derive(Clone, Debug, Default)]
pub struct Board<M, R, A, C> {
    pub memory: M,
    pub registers: R,
    pub alu: A,
    pub clock: C,
}

impl<M, R, A, C> Board<M, R, A, C> {
    pub fn new(memory: M, registers: R, alu: A, clock: C) -> Self {
        Board {
            memory,
            registers,
            alu,
            clock,
        }
    }
}
