pub mod config;
pub mod cpu;
mod cpu_micro;
pub mod error;
pub mod machine;

use anyhow::{Context, Result};
use cpu::RegisterStore;

pub use asmboy_common::{Address, IndirectAddress, Instruction, Label, Operand, Register, Word};
pub use config::Config;
pub use cpu::{Execution, Flags, InstructionController, Reducer, Step};
pub use cpu_micro::{get_all, InstructionDef, Opcode};
pub use error::Error;
pub use machine::{Machine, MemoryController, RunSummary};

/// Run `program` to completion and hand back the halted machine so the
/// caller can inspect output, registers and counters.
pub fn run(program: Vec<Instruction>, memory: MemoryController, config: Config) -> Result<Machine> {
    let mut machine = Machine::new(program, memory, config);
    machine.run().with_context(|| {
        let ip = machine.cpu().board.registers.instruction_pointer();
        match machine.cpu().current() {
            Some(current) => format!("program faulted at {ip} (`{current}`)"),
            None => format!("program faulted at {ip}"),
        }
    })?;
    Ok(machine)
}
