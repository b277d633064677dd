pub mod instruction;
pub mod operand;

pub use instruction::Instruction;
pub use operand::{Address, IndirectAddress, Label, Operand, Register};

/// Machine word used for every register, memory cell and immediate.
pub type Word = i64;
