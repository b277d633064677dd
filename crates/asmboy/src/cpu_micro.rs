//! Micro-op sequencing for cycle-level instruction stepping.
//!
//! Every handler is a small state machine driven by `MicroOp::step`. One
//! call performs the work of a single cycle and reports whether the
//! instruction suspends at a cycle boundary (`Flow::Tick`), has finished
//! (`Flow::Done`) or raised the program-exit signal (`Flow::Exit`). The
//! stage index and the values carried from one cycle to the next live in
//! `MicroState`, owned by the instruction controller.

mod dispatch;
mod instructions;
mod kind;

use asmboy_common::Word;

pub use dispatch::{get_all, InstructionDef};
pub(crate) use instructions::MicroOp;
pub use kind::Opcode;

/// Outcome of one micro-op step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Tick,
    Done,
    Exit,
}

/// Saved locals of the in-flight handler.
#[derive(Clone, Debug, Default)]
pub(crate) struct MicroState {
    /// Resolved on the first step of each (sub-)instruction.
    pub opcode: Option<Opcode>,
    pub stage: u8,
    /// Running value: destination value, reduction accumulator or the
    /// number being printed.
    pub acc: Word,
    /// Most recently fetched source value.
    pub operand: Word,
    /// Index of the next operand (reduction) or character (MOVN).
    pub cursor: usize,
    /// Digits being printed by MOVN or collected by LDN.
    pub text: String,
}
