use std::num::ParseIntError;

use asmboy_common::Word;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Faults raised while executing a program.
///
/// None of these are recovered inside the engine: side effects committed
/// by earlier cycles of the faulting instruction stay in place.
#[derive(Debug, Error)]
pub enum Error {
    #[error("operand {0} is not writeable")]
    NotWriteable(Word),
    #[error("division by zero")]
    ZeroDivision,
    #[error("malformed numeric input {input:?}")]
    MalformedNumber {
        input: String,
        #[source]
        source: ParseIntError,
    },
    #[error("unknown instruction `{0}`")]
    UnknownInstruction(String),
    #[error("`{mnemonic}` is missing operand #{index}")]
    MissingOperand { mnemonic: &'static str, index: usize },
    #[error("`{mnemonic}` expects a label, got `{operand}`")]
    ExpectedLabel {
        mnemonic: &'static str,
        operand: String,
    },
    #[error("unknown register `{0}`")]
    UnknownRegister(String),
    #[error("unknown memory label `{0}`")]
    UnknownLabel(String),
    #[error("address #{label}[{offset}] is outside of a {size}-word region")]
    AddressOutOfRange {
        label: String,
        offset: Word,
        size: usize,
    },
    #[error("value {0} is not a character code")]
    InvalidCharacter(Word),
    #[error("device `{0}` does not support this access")]
    DeviceAccess(&'static str),
    #[error("instruction pointer {0} is outside of the program")]
    InstructionPointerOutOfRange(Word),
    #[error("cycle limit of {0} exceeded")]
    CycleLimitExceeded(u64),
}
