use std::collections::{HashMap, VecDeque};

use asmboy_common::{Address, Word};

use crate::config::{NULL_TERM, STDERR, STDIN, STDOUT};
use crate::cpu::Memory;
use crate::error::{Error, Result};

/// Labelled data regions plus the character stream devices.
///
/// `#STDOUT` and `#STDERR` are write-only sinks that append one character
/// per write. `#STDIN` is a read-only source that yields one character per
/// read and the terminator code once the fed input runs out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryController {
    regions: HashMap<String, Vec<Word>>,
    stdout: String,
    stderr: String,
    stdin: VecDeque<char>,
    null_term: Word,
}

impl Default for MemoryController {
    fn default() -> Self {
        MemoryController::new(NULL_TERM)
    }
}

impl MemoryController {
    pub fn new(null_term: Word) -> Self {
        MemoryController {
            regions: HashMap::new(),
            stdout: String::new(),
            stderr: String::new(),
            stdin: VecDeque::new(),
            null_term,
        }
    }

    /// Code returned by `#STDIN` once the fed input runs out.
    #[inline]
    pub fn null_term(&self) -> Word {
        self.null_term
    }

    pub fn set_null_term(&mut self, null_term: Word) {
        self.null_term = null_term;
    }

    /// Create (or reset) a zero-filled region of `size` words.
    pub fn allocate(&mut self, label: impl Into<String>, size: usize) {
        self.regions.insert(label.into(), vec![0; size]);
    }

    /// Create (or replace) a region initialised with `words`.
    pub fn load(&mut self, label: impl Into<String>, words: Vec<Word>) {
        self.regions.insert(label.into(), words);
    }

    pub fn region(&self, label: &str) -> Option<&[Word]> {
        self.regions.get(label).map(Vec::as_slice)
    }

    /// Queue `text` for reads from `#STDIN`.
    pub fn feed_input(&mut self, text: &str) {
        self.stdin.extend(text.chars());
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn take_stdout(&mut self) -> String {
        std::mem::take(&mut self.stdout)
    }

    pub fn take_stderr(&mut self) -> String {
        std::mem::take(&mut self.stderr)
    }

    fn cell(&mut self, address: &Address) -> Result<&mut Word> {
        let region = self
            .regions
            .get_mut(&address.label)
            .ok_or_else(|| Error::UnknownLabel(address.label.clone()))?;
        let size = region.len();
        usize::try_from(address.offset)
            .ok()
            .and_then(|index| region.get_mut(index))
            .ok_or_else(|| Error::AddressOutOfRange {
                label: address.label.clone(),
                offset: address.offset,
                size,
            })
    }
}

fn to_char(value: Word) -> Result<char> {
    u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .ok_or(Error::InvalidCharacter(value))
}

impl Memory for MemoryController {
    fn get(&mut self, address: &Address) -> Result<Word> {
        match address.label.as_str() {
            STDIN => Ok(self
                .stdin
                .pop_front()
                .map_or(self.null_term, |ch| Word::from(u32::from(ch)))),
            STDOUT => Err(Error::DeviceAccess(STDOUT)),
            STDERR => Err(Error::DeviceAccess(STDERR)),
            _ => self.cell(address).map(|cell| *cell),
        }
    }

    fn set(&mut self, address: &Address, value: Word) -> Result<()> {
        match address.label.as_str() {
            STDOUT => {
                let ch = to_char(value)?;
                log::trace!("stdout <- {ch:?}");
                self.stdout.push(ch);
                Ok(())
            }
            STDERR => {
                let ch = to_char(value)?;
                log::trace!("stderr <- {ch:?}");
                self.stderr.push(ch);
                Ok(())
            }
            STDIN => Err(Error::DeviceAccess(STDIN)),
            _ => {
                *self.cell(address)? = value;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_read_and_write() {
        let mut memory = MemoryController::default();
        memory.load("data", vec![1, 2, 3]);
        assert_eq!(memory.get(&Address::new("data", 2)).unwrap(), 3);
        memory.set(&Address::new("data", 0), 9).unwrap();
        assert_eq!(memory.region("data"), Some(&[9, 2, 3][..]));
    }

    #[test]
    fn out_of_range_and_unknown_label() {
        let mut memory = MemoryController::default();
        memory.allocate("buf", 2);
        assert!(matches!(
            memory.get(&Address::new("buf", 2)),
            Err(Error::AddressOutOfRange { size: 2, offset: 2, .. })
        ));
        assert!(matches!(
            memory.set(&Address::new("buf", -1), 0),
            Err(Error::AddressOutOfRange { .. })
        ));
        assert!(matches!(
            memory.get(&Address::new("nope", 0)),
            Err(Error::UnknownLabel(label)) if label == "nope"
        ));
    }

    #[test]
    fn stdout_collects_characters() {
        let mut memory = MemoryController::default();
        memory.set(&Address::new(STDOUT, 0), 'h' as Word).unwrap();
        memory.set(&Address::new(STDOUT, 0), 'i' as Word).unwrap();
        memory.set(&Address::new(STDERR, 0), '!' as Word).unwrap();
        assert_eq!(memory.stdout(), "hi");
        assert_eq!(memory.take_stderr(), "!");
        assert_eq!(memory.stderr(), "");
        assert!(matches!(
            memory.set(&Address::new(STDOUT, 0), -1),
            Err(Error::InvalidCharacter(-1))
        ));
        assert!(matches!(
            memory.get(&Address::new(STDOUT, 0)),
            Err(Error::DeviceAccess(STDOUT))
        ));
    }

    #[test]
    fn stdin_yields_terminator_when_exhausted() {
        let mut memory = MemoryController::new(-1);
        memory.feed_input("7");
        let stdin = Address::new(STDIN, 0);
        assert_eq!(memory.get(&stdin).unwrap(), '7' as Word);
        assert_eq!(memory.get(&stdin).unwrap(), -1);
        assert_eq!(memory.get(&stdin).unwrap(), -1);
        assert!(memory.set(&stdin, 1).is_err());
    }
}
