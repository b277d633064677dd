mod alu;
mod bus;
mod operand;


use std::collections::HashMap;
use std::iter::FusedIterator;

use asmboy_common::Instruction;

pub use alu::{Flags, Reducer};
pub use bus::{Board, Clock, FlagUnit, Memory, RegisterStore};
pub use operand::shares_bus;

use crate::config::Config;
use crate::cpu_micro::{self, Flow, InstructionDef, MicroOp, MicroState, Opcode};
use crate::error::Result;
use crate::machine::{Alu, ClockGenerator, MemoryController, RegisterController};

/// Suspension marker produced at every cycle boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// A cycle elapsed inside the instruction body.
    Cycle,
    /// The loop-overhead cycle; the instruction has retired.
    Retired,
    /// The loop-overhead cycle of an instruction that halted the program.
    Halted,
}

impl Step {
    /// Whether this is the last marker of the instruction.
    #[inline]
    pub fn is_final(self) -> bool {
        !matches!(self, Step::Cycle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Body,
    Retire { halted: bool },
}

/// Executes instructions one cycle at a time against a [`Board`].
///
/// An instruction is armed with [`begin`](Self::begin) and then driven by
/// repeated [`step_cycle`](Self::step_cycle) calls, each of which runs up to
/// the next cycle boundary and ticks the clock once. The controller keeps
/// the in-flight handler's stage and saved locals between calls, so a
/// driver can stop after any single cycle.
///
/// `current` and `current_sub` describe what is executing. They are only
/// meaningful between two cycles and are overwritten by the next `begin`.
#[derive(Debug)]
pub struct InstructionController<
    M = MemoryController,
    R = RegisterController,
    A = Alu,
    C = ClockGenerator,
> {
    pub board: Board<M, R, A, C>,
    config: Config,
    current: Option<Instruction>,
    current_sub: Option<usize>,
    phase: Phase,
    micro: MicroState,
}

impl<M: Memory, R: RegisterStore, A: FlagUnit, C: Clock> InstructionController<M, R, A, C> {
    pub fn new(board: Board<M, R, A, C>, config: Config) -> Self {
        InstructionController {
            board,
            config,
            current: None,
            current_sub: None,
            phase: Phase::Idle,
            micro: MicroState::default(),
        }
    }

    /// Mnemonic to handler table used for dispatch.
    pub fn get_all() -> &'static HashMap<&'static str, InstructionDef> {
        cpu_micro::get_all()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The instruction currently (or most recently) executing.
    pub fn current(&self) -> Option<&Instruction> {
        self.current.as_ref()
    }

    /// The sub-instruction currently executing, if the current instruction
    /// is composite.
    pub fn current_sub(&self) -> Option<&Instruction> {
        let index = self.current_sub?;
        self.current.as_ref()?.sub.get(index)
    }

    /// `true` while an instruction has cycles left to run.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Start executing `instruction`, dropping whatever was in flight.
    pub fn begin(&mut self, instruction: &Instruction) {
        log::debug!(
            "{:>4}: {}",
            self.board.registers.instruction_pointer(),
            instruction
        );
        self.current = Some(instruction.clone());
        self.current_sub = instruction.is_composite().then_some(0);
        self.micro = MicroState::default();
        self.phase = Phase::Body;
    }

    /// Run `instruction` as a lazy sequence of cycle markers.
    ///
    /// The sequence must be drained for the instruction to retire.
    pub fn execute(&mut self, instruction: &Instruction) -> Execution<'_, M, R, A, C> {
        self.begin(instruction);
        Execution { cpu: self }
    }

    /// Advance the in-flight instruction up to its next cycle boundary.
    ///
    /// Returns `None` when nothing is in flight. A fault ends the
    /// instruction immediately: the instruction pointer is not advanced and
    /// no overhead cycle is charged.
    pub fn step_cycle(&mut self) -> Option<Result<Step>> {
        loop {
            match self.phase {
                Phase::Idle => return None,
                Phase::Body => match self.step_body() {
                    Ok(Flow::Tick) => {
                        self.board.clock.tick();
                        log::trace!("cycle (stage {})", self.micro.stage);
                        return Some(Ok(Step::Cycle));
                    }
                    Ok(Flow::Done) => self.next_sub(),
                    Ok(Flow::Exit) => self.phase = Phase::Retire { halted: true },
                    Err(err) => {
                        self.phase = Phase::Idle;
                        if let Some(current) = &self.current {
                            log::error!("`{current}` faulted: {err}");
                        }
                        return Some(Err(err));
                    }
                },
                Phase::Retire { halted } => {
                    let ip = self.board.registers.instruction_pointer();
                    self.board.registers.set_instruction_pointer(ip.wrapping_add(1));
                    self.board.clock.tick();
                    self.board.clock.inst();
                    self.phase = Phase::Idle;
                    return Some(Ok(if halted { Step::Halted } else { Step::Retired }));
                }
            }
        }
    }

    fn step_body(&mut self) -> Result<Flow> {
        let Some(instruction) = self.current.as_ref() else {
            return Ok(Flow::Done);
        };
        let target = match self.current_sub {
            Some(index) => &instruction.sub[index],
            None => instruction,
        };
        let opcode = match self.micro.opcode {
            Some(opcode) => opcode,
            None => {
                let opcode = Opcode::from_mnemonic(&target.name)?;
                self.micro.opcode = Some(opcode);
                opcode
            }
        };
        MicroOp {
            board: &mut self.board,
            state: &mut self.micro,
            operands: &target.operands,
            opcode,
            null_term: self.config.null_term,
        }
        .step()
    }

    fn next_sub(&mut self) {
        self.micro = MicroState::default();
        let remaining = match (self.current_sub, &self.current) {
            (Some(index), Some(current)) if index + 1 < current.sub.len() => Some(index + 1),
            _ => None,
        };
        match remaining {
            Some(index) => self.current_sub = Some(index),
            None => self.phase = Phase::Retire { halted: false },
        }
    }
}

/// One-shot cycle sequence of a single instruction, see
/// [`InstructionController::execute`].
pub struct Execution<'a, M, R, A, C> {
    cpu: &'a mut InstructionController<M, R, A, C>,
}

impl<M: Memory, R: RegisterStore, A: FlagUnit, C: Clock> Iterator for Execution<'_, M, R, A, C> {
    type Item = Result<Step>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cpu.step_cycle()
    }
}

impl<M: Memory, R: RegisterStore, A: FlagUnit, C: Clock> FusedIterator
    for Execution<'_, M, R, A, C>
{
}
