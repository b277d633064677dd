use std::fmt;

/// Every instruction the engine knows how to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Xor,
    And,
    Or,
    Inc,
    Dec,
    Mov,
    /// Print a number digit by digit.
    Movn,
    /// Read a number character by character.
    Ldn,
    Cmp,
    Hlt,
    Jmp,
    Je,
    Jne,
    Jl,
    Jg,
    Jle,
    Jge,
}

impl Opcode {
    pub const ALL: [Opcode; 22] = [
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::Xor,
        Opcode::And,
        Opcode::Or,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Mov,
        Opcode::Movn,
        Opcode::Ldn,
        Opcode::Cmp,
        Opcode::Hlt,
        Opcode::Jmp,
        Opcode::Je,
        Opcode::Jne,
        Opcode::Jl,
        Opcode::Jg,
        Opcode::Jle,
        Opcode::Jge,
    ];

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Mod => "mod",
            Opcode::Xor => "xor",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Inc => "inc",
            Opcode::Dec => "dec",
            Opcode::Mov => "mov",
            Opcode::Movn => "movn",
            Opcode::Ldn => "ldn",
            Opcode::Cmp => "cmp",
            Opcode::Hlt => "hlt",
            Opcode::Jmp => "jmp",
            Opcode::Je => "je",
            Opcode::Jne => "jne",
            Opcode::Jl => "jl",
            Opcode::Jg => "jg",
            Opcode::Jle => "jle",
            Opcode::Jge => "jge",
        }
    }

    /// Operand signature in assembler notation.
    pub const fn signature(self) -> &'static str {
        match self {
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Mod
            | Opcode::Xor
            | Opcode::And
            | Opcode::Or => "dest, *ops",
            Opcode::Inc | Opcode::Dec => "dest",
            Opcode::Mov | Opcode::Movn | Opcode::Ldn => "dest, src",
            Opcode::Cmp => "op1, op2",
            Opcode::Hlt => "",
            Opcode::Jmp
            | Opcode::Je
            | Opcode::Jne
            | Opcode::Jl
            | Opcode::Jg
            | Opcode::Jle
            | Opcode::Jge => "label",
        }
    }

    pub const fn summary(self) -> &'static str {
        match self {
            Opcode::Add => "dest = dest + src; with more sources dest = (a + b) + ...",
            Opcode::Sub => "dest = dest - src; with more sources dest = (a - b) - ...",
            Opcode::Mul => "dest = dest * src; with more sources dest = (a * b) * ...",
            Opcode::Div => "dest = dest // src (floor); faults on zero divisor",
            Opcode::Mod => "dest = dest % src (floor); faults on zero divisor",
            Opcode::Xor => "dest = dest ^ src",
            Opcode::And => "dest = dest & src",
            Opcode::Or => "dest = dest | src",
            Opcode::Inc => "dest = dest + 1",
            Opcode::Dec => "dest = dest - 1",
            Opcode::Mov => "dest = src; writing #STDOUT or #STDERR prints a character",
            Opcode::Movn => "print src as decimal digits to dest, one per cycle",
            Opcode::Ldn => "read decimal digits from src until the terminator into dest",
            Opcode::Cmp => "set flags from op1 - op2 without storing the result",
            Opcode::Hlt => "stop execution",
            Opcode::Jmp => "jump to label",
            Opcode::Je => "jump to label if Z is set (equal)",
            Opcode::Jne => "jump to label if Z is clear (not equal)",
            Opcode::Jl => "jump to label if N is set (less)",
            Opcode::Jg => "jump to label if N is clear (greater or equal)",
            Opcode::Jle => "jump to label if Z or N is set (less or equal)",
            Opcode::Jge => "jump to label if Z is set or N is clear (greater or equal)",
        }
    }

    /// Condition of a jump instruction given the Z and N flags, `None` for
    /// anything that is not a jump.
    pub const fn jump_taken(self, z: bool, n: bool) -> Option<bool> {
        let taken = match self {
            Opcode::Jmp => true,
            Opcode::Je => z,
            Opcode::Jne => !z,
            Opcode::Jl => n,
            Opcode::Jg => !n,
            Opcode::Jle => z || n,
            Opcode::Jge => z || !n,
            _ => return None,
        };
        Some(taken)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic().to_ascii_uppercase())
    }
}
