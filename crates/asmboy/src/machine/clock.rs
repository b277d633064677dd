use crate::cpu::Clock;

/// Counts elapsed cycles and retired instructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockGenerator {
    ticks: u64,
    instructions: u64,
}

impl ClockGenerator {
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn instructions(&self) -> u64 {
        self.instructions
    }
}

impl Clock for ClockGenerator {
    #[inline]
    fn tick(&mut self) {
        self.ticks += 1;
    }

    #[inline]
    fn inst(&mut self) {
        self.instructions += 1;
    }
}
