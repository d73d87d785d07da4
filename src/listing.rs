//! listings of whole program images: one [`Line`] per instruction word.

use core::fmt;
use core::fmt::Write;

use yaxpeax_arch::{Reader, U8Reader};

use crate::{Chip8Reader, Chip8Word, InstDecoder, Instruction};

/// the address CHIP-8 programs are loaded at.
pub const PROGRAM_ORIGIN: u16 = 0x200;

/// the bit pattern of a line starts in this column, unless the text before it is already longer.
const PATTERN_COLUMN: usize = 30;

/// the decoded text of one word, or nothing if the word is not a defined instruction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Mnemonic(Option<Instruction>);

impl Mnemonic {
    /// the decoded instruction, if there is one.
    pub fn instruction(&self) -> Option<&Instruction> {
        self.0.as_ref()
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.as_ref() {
            Some(inst) => write!(f, "{}", inst),
            None => Ok(()),
        }
    }
}

/// decode `word` to its mnemonic text. undefined words produce an empty mnemonic rather than an
/// error.
///
/// ```
/// assert_eq!(yaxpeax_chip8::mnemonic(0x6a2f).to_string(), "LD VA, 0x2f");
/// assert_eq!(yaxpeax_chip8::mnemonic(0x0abc).to_string(), "");
/// ```
pub fn mnemonic(word: u16) -> Mnemonic {
    match InstDecoder::decode_word(word) {
        Ok(inst) => Mnemonic(Some(inst)),
        Err(_) => {
            log::trace!("undefined chip-8 word {:04x}", word);
            Mnemonic(None)
        }
    }
}

/// both bytes of a word drawn as `*` for set bits and `_` for clear ones, high byte first.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BitPattern(pub u16);

impl fmt::Display for BitPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, &byte) in self.0.to_be_bytes().iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            for bit in (0..8).rev() {
                f.write_char(if (byte >> bit) & 1 == 1 { '*' } else { '_' })?;
            }
        }
        Ok(())
    }
}

/// one line of a listing: where a word was loaded, the word, and what it decodes to.
///
/// the `Display` impl renders the line as
/// `"{address:04x}: {word:04x}: {mnemonic}"`, space-padded to column 30, then the
/// [`BitPattern`] of the word.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Line {
    address: usize,
    word: Chip8Word,
    mnemonic: Mnemonic,
}

impl Line {
    pub fn new(address: usize, word: u16) -> Self {
        Line {
            address,
            word: Chip8Word::new(word),
            mnemonic: mnemonic(word),
        }
    }

    /// the load address of this word: the listing origin plus its byte offset.
    pub fn address(&self) -> usize {
        self.address
    }

    pub fn word(&self) -> Chip8Word {
        self.word
    }

    pub fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    pub fn instruction(&self) -> Option<&Instruction> {
        self.mnemonic.instruction()
    }

    pub fn bit_pattern(&self) -> BitPattern {
        BitPattern(self.word.value())
    }
}

/// counts characters on their way to the formatter, so the bit pattern can be placed by column.
struct Column<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    width: usize,
}

impl fmt::Write for Column<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.width += s.chars().count();
        self.f.write_str(s)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut out = Column { f, width: 0 };
        write!(out, "{:04x}: {}: {}", self.address, self.word, self.mnemonic)?;
        // no padding, and no truncation, once the text reaches the column.
        for _ in out.width..PATTERN_COLUMN {
            out.write_char(' ')?;
        }
        write!(out, "{}", self.bit_pattern())
    }
}

/// an iterator over the [`Line`]s of a program image.
///
/// words are read in order, two bytes at a time, starting at offset zero. a trailing odd byte
/// cannot form a word and is dropped without producing a line.
pub struct Listing<'a> {
    words: Chip8Reader<U8Reader<'a>>,
    origin: usize,
    offset: usize,
    remaining: usize,
}

impl<'a> Listing<'a> {
    /// list `data` as if loaded at [`PROGRAM_ORIGIN`].
    pub fn new(data: &'a [u8]) -> Self {
        Listing::with_origin(data, PROGRAM_ORIGIN)
    }

    /// list `data` as if loaded at `origin`.
    pub fn with_origin(data: &'a [u8], origin: u16) -> Self {
        if data.len() % 2 != 0 {
            log::debug!("dropping trailing byte {:02x} at offset {:#x}", data[data.len() - 1], data.len() - 1);
        }

        Listing {
            words: Chip8Reader::of_u8(data),
            origin: origin as usize,
            offset: 0,
            remaining: data.len() / 2,
        }
    }
}

impl<'a> Iterator for Listing<'a> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.remaining == 0 {
            return None;
        }

        let word = self.words.next().ok()?;
        let line = Line::new(self.origin + self.offset, word.value());
        self.offset += 2;
        self.remaining -= 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for Listing<'a> {}

impl<'a> core::iter::FusedIterator for Listing<'a> {}
