use std::fmt;

use asmboy_common::Word;
use bitflags::bitflags;

bitflags! {
    /// Condition flags set by arithmetic and comparisons.
    ///
    /// - Z: the last result was zero (operands compared equal)
    /// - N: the last result was negative (first operand was smaller)
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const Z = 1 << 7;
        const N = 1 << 6;
    }
}

impl Flags {
    /// Flags describing `result`.
    #[inline]
    pub fn from_result(result: Word) -> Self {
        let mut flags = Flags::empty();
        flags.set(Flags::Z, result == 0);
        flags.set(Flags::N, result < 0);
        flags
    }
}

/// Binary operation folded by the reduction instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reducer {
    Add,
    Sub,
    Mul,
    /// Floor division.
    Div,
    /// Remainder of floor division; takes the sign of the divisor.
    Mod,
    Xor,
    And,
    Or,
}

impl Reducer {
    /// Apply the operation, returning `None` on a zero divisor.
    ///
    /// Words are two's complement and wrap on overflow.
    pub fn apply(self, a: Word, b: Word) -> Option<Word> {
        let value = match self {
            Reducer::Add => a.wrapping_add(b),
            Reducer::Sub => a.wrapping_sub(b),
            Reducer::Mul => a.wrapping_mul(b),
            Reducer::Div => floor_div(a, b)?,
            Reducer::Mod => floor_mod(a, b)?,
            Reducer::Xor => a ^ b,
            Reducer::And => a & b,
            Reducer::Or => a | b,
        };
        Some(value)
    }
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Reducer::Add => "+",
            Reducer::Sub => "-",
            Reducer::Mul => "*",
            Reducer::Div => "//",
            Reducer::Mod => "%",
            Reducer::Xor => "^",
            Reducer::And => "&",
            Reducer::Or => "|",
        };
        f.write_str(symbol)
    }
}

fn floor_div(a: Word, b: Word) -> Option<Word> {
    if b == 0 {
        return None;
    }
    let quotient = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        Some(quotient.wrapping_sub(1))
    } else {
        Some(quotient)
    }
}

fn floor_mod(a: Word, b: Word) -> Option<Word> {
    if b == 0 {
        return None;
    }
    let rem = a.wrapping_rem(b);
    if rem != 0 && ((rem < 0) != (b < 0)) {
        Some(rem.wrapping_add(b))
    } else {
        Some(rem)
    }
}
