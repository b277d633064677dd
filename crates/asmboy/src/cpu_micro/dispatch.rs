use std::collections::HashMap;

use lazy_static::lazy_static;

use super::Opcode;
use crate::error::{Error, Result};

/// Dispatch table entry, also the source for instruction reference docs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionDef {
    pub mnemonic: &'static str,
    pub opcode: Opcode,
    pub operands: &'static str,
    pub summary: &'static str,
}

lazy_static! {
    static ref INSTRUCTIONS: HashMap<&'static str, InstructionDef> = Opcode::ALL
        .iter()
        .map(|&opcode| {
            let def = InstructionDef {
                mnemonic: opcode.mnemonic(),
                opcode,
                operands: opcode.signature(),
                summary: opcode.summary(),
            };
            (def.mnemonic, def)
        })
        .collect();
}

/// Every available instruction keyed by lower-case mnemonic.
pub fn get_all() -> &'static HashMap<&'static str, InstructionDef> {
    &INSTRUCTIONS
}

impl Opcode {
    /// Look up a mnemonic, ignoring ASCII case.
    pub fn from_mnemonic(name: &str) -> Result<Opcode> {
        INSTRUCTIONS
            .get(name.to_ascii_lowercase().as_str())
            .map(|def| def.opcode)
            .ok_or_else(|| Error::UnknownInstruction(name.to_string()))
    }
}
