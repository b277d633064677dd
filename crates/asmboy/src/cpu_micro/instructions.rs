use asmboy_common::{Operand, Word};

use super::{Flow, MicroState, Opcode};
use crate::cpu::{shares_bus, Board, Clock, FlagUnit, Flags, Memory, Reducer, RegisterStore};
use crate::error::{Error, Result};

/// A single step of the handler for `opcode`, borrowing the controller's
/// board and micro state for the duration of one cycle.
pub(crate) struct MicroOp<'a, M, R, A, C> {
    pub board: &'a mut Board<M, R, A, C>,
    pub state: &'a mut MicroState,
    pub operands: &'a [Operand],
    pub opcode: Opcode,
    pub null_term: Word,
}

impl<'a, M: Memory, R: RegisterStore, A: FlagUnit, C: Clock> MicroOp<'a, M, R, A, C> {
    pub fn step(&mut self) -> Result<Flow> {
        match self.opcode {
            Opcode::Add => self.reduce(Reducer::Add),
            Opcode::Sub => self.reduce(Reducer::Sub),
            Opcode::Mul => self.reduce(Reducer::Mul),
            Opcode::Div => self.reduce(Reducer::Div),
            Opcode::Mod => self.reduce(Reducer::Mod),
            Opcode::Xor => self.reduce(Reducer::Xor),
            Opcode::And => self.reduce(Reducer::And),
            Opcode::Or => self.reduce(Reducer::Or),
            Opcode::Inc => self.step_by(1),
            Opcode::Dec => self.step_by(-1),
            Opcode::Mov => self.mov(),
            Opcode::Movn => self.print_number(),
            Opcode::Ldn => self.load_number(),
            Opcode::Cmp => self.compare(),
            Opcode::Hlt => self.halt(),
            Opcode::Jmp
            | Opcode::Je
            | Opcode::Jne
            | Opcode::Jl
            | Opcode::Jg
            | Opcode::Jle
            | Opcode::Jge => self.jump(),
        }
    }

    fn operand(&self, index: usize) -> Result<&'a Operand> {
        let operands: &'a [Operand] = self.operands;
        operands.get(index).ok_or(Error::MissingOperand {
            mnemonic: self.opcode.mnemonic(),
            index,
        })
    }

    /// ADD/SUB/MUL/DIV/MOD/XOR/AND/OR.
    ///
    /// `OP dest, src` folds `src` into `dest`. With more sources,
    /// `OP dest, a, b, c` stores `(a OP b) OP c` into `dest`.
    ///
    /// Per source: one extra cycle if it shares a bus with the previously
    /// fetched operand, one cycle to fetch it, one cycle in the ALU. The
    /// final write is free.
    fn reduce(&mut self, reducer: Reducer) -> Result<Flow> {
        let operands = self.operands;
        let dest = self.operand(0)?;
        self.operand(1)?;
        loop {
            match self.state.stage {
                0 => {
                    let (first, cursor) = if operands.len() > 2 { (1, 2) } else { (0, 1) };
                    self.state.acc = self.board.resolve(&operands[first])?;
                    self.state.cursor = cursor;
                    self.state.stage = 1;
                }
                1 => {
                    let prev = &operands[self.state.cursor - 1];
                    let next = &operands[self.state.cursor];
                    self.state.stage = 2;
                    if shares_bus(prev, next) {
                        // Bus contention: wait a cycle before the fetch.
                        return Ok(Flow::Tick);
                    }
                }
                2 => {
                    self.state.operand = self.board.resolve(&operands[self.state.cursor])?;
                    self.state.stage = 3;
                    return Ok(Flow::Tick);
                }
                3 => {
                    self.state.acc =
                        self.board
                            .alu
                            .operation(reducer, self.state.acc, self.state.operand)?;
                    self.state.cursor += 1;
                    self.state.stage = if self.state.cursor < operands.len() { 1 } else { 4 };
                    return Ok(Flow::Tick);
                }
                _ => {
                    self.board.write(dest, self.state.acc)?;
                    return Ok(Flow::Done);
                }
            }
        }
    }

    /// INC/DEC: read, one cycle, write back.
    fn step_by(&mut self, delta: Word) -> Result<Flow> {
        let dest = self.operand(0)?;
        match self.state.stage {
            0 => {
                self.state.acc = self.board.resolve(dest)?;
                self.state.stage = 1;
                Ok(Flow::Tick)
            }
            _ => {
                self.board.write(dest, self.state.acc.wrapping_add(delta))?;
                Ok(Flow::Done)
            }
        }
    }

    /// MOV dest, src. Stream sinks are handled by the memory itself.
    fn mov(&mut self) -> Result<Flow> {
        let dest = self.operand(0)?;
        let src = self.operand(1)?;
        match self.state.stage {
            0 => {
                self.state.acc = self.board.resolve(src)?;
                self.state.stage = 1;
                Ok(Flow::Tick)
            }
            _ => {
                self.board.write(dest, self.state.acc)?;
                Ok(Flow::Done)
            }
        }
    }

    /// MOVN dest, src: one cycle to fetch, then one cycle per character of
    /// the decimal representation (sign included).
    fn print_number(&mut self) -> Result<Flow> {
        let dest = self.operand(0)?;
        let src = self.operand(1)?;
        match self.state.stage {
            0 => {
                self.state.acc = self.board.resolve(src)?;
                self.state.text = self.state.acc.to_string();
                self.state.cursor = 0;
                self.state.stage = 1;
                Ok(Flow::Tick)
            }
            _ => match self.state.text.as_bytes().get(self.state.cursor) {
                Some(&digit) => {
                    self.board.write(dest, Word::from(digit))?;
                    self.state.cursor += 1;
                    Ok(Flow::Tick)
                }
                None => Ok(Flow::Done),
            },
        }
    }

    /// LDN dest, src: read characters from `src`, one per cycle, until the
    /// terminator code, then parse them as a decimal number.
    fn load_number(&mut self) -> Result<Flow> {
        let dest = self.operand(0)?;
        let src = self.operand(1)?;
        let code = self.board.resolve(src)?;
        if code != self.null_term {
            let ch = u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .ok_or(Error::InvalidCharacter(code))?;
            self.state.text.push(ch);
            return Ok(Flow::Tick);
        }

        let input = std::mem::take(&mut self.state.text);
        let parsed = input.trim().parse::<Word>();
        match parsed {
            Ok(value) => {
                self.board.write(dest, value)?;
                Ok(Flow::Done)
            }
            Err(source) => Err(Error::MalformedNumber { input, source }),
        }
    }

    /// CMP op1, op2: flags from `op1 - op2`, nothing stored.
    fn compare(&mut self) -> Result<Flow> {
        let a = self.operand(0)?;
        let b = self.operand(1)?;
        loop {
            match self.state.stage {
                0 => {
                    self.state.acc = self.board.resolve(a)?;
                    self.state.stage = 1;
                    if shares_bus(a, b) {
                        return Ok(Flow::Tick);
                    }
                }
                1 => {
                    self.state.operand = self.board.resolve(b)?;
                    self.state.stage = 2;
                    return Ok(Flow::Tick);
                }
                _ => {
                    self.board
                        .alu
                        .operation(Reducer::Sub, self.state.acc, self.state.operand)?;
                    return Ok(Flow::Done);
                }
            }
        }
    }

    fn halt(&mut self) -> Result<Flow> {
        match self.state.stage {
            0 => {
                self.state.stage = 1;
                Ok(Flow::Tick)
            }
            _ => Ok(Flow::Exit),
        }
    }

    /// Jumps run inside the loop-overhead cycle and never tick on their own.
    ///
    /// The target is stored as `label - 1` because the dispatch loop
    /// increments the instruction pointer after every instruction.
    fn jump(&mut self) -> Result<Flow> {
        let target = match self.operand(0)? {
            Operand::Label(label) => label.value,
            other => {
                return Err(Error::ExpectedLabel {
                    mnemonic: self.opcode.mnemonic(),
                    operand: other.to_string(),
                })
            }
        };
        let z = self.board.alu.flag(Flags::Z);
        let n = self.board.alu.flag(Flags::N);
        if self.opcode.jump_taken(z, n).unwrap_or(false) {
            self.board
                .registers
                .set_instruction_pointer(target.wrapping_sub(1));
        }
        Ok(Flow::Done)
    }
}
