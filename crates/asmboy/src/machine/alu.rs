use asmboy_common::Word;

use crate::cpu::{FlagUnit, Flags, Reducer};
use crate::error::{Error, Result};

/// Reference arithmetic unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Alu {
    flags: Flags,
}

impl Alu {
    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    #[inline]
    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }
}

impl FlagUnit for Alu {
    fn operation(&mut self, reducer: Reducer, a: Word, b: Word) -> Result<Word> {
        let result = reducer.apply(a, b).ok_or(Error::ZeroDivision)?;
        self.flags = Flags::from_result(result);
        log::trace!("alu: {a} {reducer} {b} = {result} ({:?})", self.flags);
        Ok(result)
    }

    #[inline]
    fn flag(&self, flag: Flags) -> bool {
        self.flags.contains(flag)
    }
}
