mod alu;
mod clock;
mod memory;
mod registers;

#[cfg(test)]
mod tests;

use asmboy_common::Instruction;

pub use alu::Alu;
pub use clock::ClockGenerator;
pub use memory::MemoryController;
pub use registers::RegisterController;

use crate::config::Config;
use crate::cpu::{Board, InstructionController, RegisterStore, Step};
use crate::error::{Error, Result};

/// Cycle and instruction totals of a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub instructions: u64,
}

/// A program loaded into the reference collaborators.
///
/// The machine fetches `program[ip]` whenever the controller is idle and
/// otherwise just forwards cycles to it.
#[derive(Debug)]
pub struct Machine {
    cpu: InstructionController,
    program: Vec<Instruction>,
}

impl Machine {
    /// The config's terminator replaces whatever `memory` was built with,
    /// so `LDN` always stops on the code an exhausted `#STDIN` yields.
    pub fn new(program: Vec<Instruction>, mut memory: MemoryController, config: Config) -> Self {
        memory.set_null_term(config.null_term);
        let registers = RegisterController::new(&config.registers);
        let board = Board::new(memory, registers, Alu::default(), ClockGenerator::default());
        Machine {
            cpu: InstructionController::new(board, config),
            program,
        }
    }

    pub fn cpu(&self) -> &InstructionController {
        &self.cpu
    }

    pub fn memory(&self) -> &MemoryController {
        &self.cpu.board.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryController {
        &mut self.cpu.board.memory
    }

    pub fn registers(&self) -> &RegisterController {
        &self.cpu.board.registers
    }

    pub fn alu(&self) -> &Alu {
        &self.cpu.board.alu
    }

    pub fn clock(&self) -> &ClockGenerator {
        &self.cpu.board.clock
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.clock().ticks(),
            instructions: self.clock().instructions(),
        }
    }

    /// Run a single cycle, fetching the next instruction first if needed.
    pub fn step_cycle(&mut self) -> Result<Step> {
        loop {
            if let Some(step) = self.cpu.step_cycle() {
                return step;
            }
            self.fetch()?;
        }
    }

    /// Run cycles until the current (or next) instruction retires.
    pub fn step_instruction(&mut self) -> Result<Step> {
        loop {
            let step = self.step_cycle()?;
            if step.is_final() {
                return Ok(step);
            }
        }
    }

    /// Run until the program halts.
    pub fn run(&mut self) -> Result<RunSummary> {
        let limit = self.cpu.config().cycle_limit;
        loop {
            if self.step_cycle()? == Step::Halted {
                let summary = self.summary();
                log::info!(
                    "halted after {} cycles, {} instructions",
                    summary.ticks,
                    summary.instructions
                );
                return Ok(summary);
            }
            if let Some(limit) = limit {
                if self.clock().ticks() > limit {
                    return Err(Error::CycleLimitExceeded(limit));
                }
            }
        }
    }

    fn fetch(&mut self) -> Result<()> {
        let ip = self.cpu.board.registers.instruction_pointer();
        let instruction = usize::try_from(ip)
            .ok()
            .and_then(|index| self.program.get(index))
            .ok_or(Error::InstructionPointerOutOfRange(ip))?;
        self.cpu.begin(instruction);
        Ok(())
    }
}
