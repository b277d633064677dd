use std::collections::HashMap;

use asmboy_common::{Register, Word};

use crate::config::DEFAULT_REGISTERS;
use crate::cpu::RegisterStore;
use crate::error::{Error, Result};

/// General-purpose registers addressed by (case-insensitive) name, plus the
/// instruction pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterController {
    registers: HashMap<String, Word>,
    ip: Word,
}

impl RegisterController {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        RegisterController {
            registers: names
                .iter()
                .map(|name| (name.as_ref().to_ascii_uppercase(), 0))
                .collect(),
            ip: 0,
        }
    }

    /// Register names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.registers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn slot(&mut self, register: &Register) -> Result<&mut Word> {
        self.registers
            .get_mut(&register.name().to_ascii_uppercase())
            .ok_or_else(|| Error::UnknownRegister(register.name().to_string()))
    }
}

impl Default for RegisterController {
    fn default() -> Self {
        RegisterController::new(&DEFAULT_REGISTERS)
    }
}

impl RegisterStore for RegisterController {
    fn get(&self, register: &Register) -> Result<Word> {
        self.registers
            .get(&register.name().to_ascii_uppercase())
            .copied()
            .ok_or_else(|| Error::UnknownRegister(register.name().to_string()))
    }

    fn set(&mut self, register: &Register, value: Word) -> Result<()> {
        *self.slot(register)? = value;
        Ok(())
    }

    #[inline]
    fn instruction_pointer(&self) -> Word {
        self.ip
    }

    #[inline]
    fn set_instruction_pointer(&mut self, value: Word) {
        self.ip = value;
    }
}
