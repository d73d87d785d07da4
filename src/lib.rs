//! # `yaxpeax-chip8`, a decoder for the CHIP-8 instruction set
//!
//! CHIP-8 is less a machine than an interpreted bytecode, first run on the COSMAC VIP in the late
//! 1970s. programs are loaded at `0x200` and consist of big-endian 16-bit instruction words; the
//! top nibble of each word selects an instruction family, and some families are further keyed on
//! the low nibble or low byte.
//!
//! there is no real distinction between code and data in a CHIP-8 image. sprites, lookup tables
//! and padding are all mixed in with instructions, so a listing of an image decodes every word
//! whether or not it was meant to be executed. [`Listing`] does exactly that: it produces one
//! [`Line`] per word and leaves the mnemonic empty where a word is not a defined instruction.
//!
//! ## usage
//!
//! the fastest way to decode a single CHIP-8 instruction is through
//! [`InstDecoder::decode_slice()`]:
//! ```
//! use yaxpeax_chip8::InstDecoder;
//!
//! let inst = InstDecoder::decode_slice(&[0xa2, 0xf0]).unwrap();
//!
//! assert_eq!("LD I, 0x2f0", inst.to_string());
//! ```
//!
//! opcodes and operands are available on the decoded instruction, as well as its length and
//! operand count:
//! ```
//! use yaxpeax_chip8::{InstDecoder, Operand, Opcode};
//!
//! let inst = InstDecoder::decode_word(0xd125).unwrap();
//!
//! assert_eq!("DRW V1, V2, 0x05", inst.to_string());
//! assert_eq!(inst.operand_count(), 3);
//! assert_eq!(inst.len(), 1);
//! assert_eq!(inst.opcode(), Opcode::DRW);
//! assert_eq!(inst.operand(0), Operand::Register(1));
//! assert_eq!(inst.operand(2), Operand::Nibble(5));
//! ```
//!
//! whole program images are listed line by line:
//! ```
//! use yaxpeax_chip8::Listing;
//!
//! let mut lines = Listing::new(&[0x00, 0xe0, 0x12, 0x00]);
//!
//! assert_eq!(lines.next().unwrap().to_string(), "0200: 00e0: CLS               ________ ***_____");
//! assert_eq!(lines.next().unwrap().to_string(), "0202: 1200: JP 0x200          ___*__*_ ________");
//! assert!(lines.next().is_none());
//! ```
//!
//! additionally, `yaxpeax-chip8` implements `yaxpeax-arch` traits for generic use, such as
//! [`yaxpeax_arch::LengthedInstruction`]. [`yaxpeax_arch::Arch`] is implemented by
//! the unit struct [`Chip8`].
//!
//! ## `#![no_std]`
//!
//! the library is `no_std` and does not allocate; the `chip8dis` binary (feature `cli`, on by
//! default) is the only part that needs `std`.

#![no_std]

mod display;
mod listing;

pub use listing::{mnemonic, BitPattern, Line, Listing, Mnemonic, PROGRAM_ORIGIN};

use yaxpeax_arch::{AddressDiff, Arch, Decoder, LengthedInstruction, Reader, ReadError, U8Reader};

/// total addressable memory of a CHIP-8 system, in bytes.
pub const MEMORY_SIZE: usize = 0x1000;

/// the largest program image that fits in memory above [`PROGRAM_ORIGIN`].
pub const ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_ORIGIN as usize;

/// a trivial struct for [`yaxpeax_arch::Arch`] to be implemented on. it's only interesting for the
/// associated type parameters.
#[derive(Hash, Eq, PartialEq, Debug, Copy, Clone)]
pub struct Chip8;

/// a 16-bit CHIP-8 instruction word.
///
/// the nibble accessors decompose the word as `op`, `x`, `y`, `n` from most to least significant,
/// with `nnn` the low twelve bits and `kk` the low eight.
#[derive(Copy, Clone, Debug, Hash, Eq, Ord, PartialOrd, PartialEq)]
#[repr(transparent)]
pub struct Chip8Word(u16);

impl Chip8Word {
    /// create a `Chip8Word` from a value `v`. every `u16` is a valid CHIP-8 word.
    pub fn new(v: u16) -> Self {
        Chip8Word(v)
    }

    /// get the value of this word as a u16
    pub fn value(&self) -> u16 {
        self.0
    }

    /// the instruction family, bits 15-12.
    pub fn op(&self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// the first register index, bits 11-8.
    pub fn x(&self) -> u8 {
        ((self.0 >> 8) & 0xf) as u8
    }

    /// the second register index, bits 7-4.
    pub fn y(&self) -> u8 {
        ((self.0 >> 4) & 0xf) as u8
    }

    /// the low nibble, bits 3-0.
    pub fn n(&self) -> u8 {
        (self.0 & 0xf) as u8
    }

    /// the 12-bit address or literal in bits 11-0.
    pub fn nnn(&self) -> u16 {
        self.0 & 0x0fff
    }

    /// the 8-bit literal in bits 7-0.
    pub fn kk(&self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// `[op, x, y, n]`
    pub fn nibbles(&self) -> [u8; 4] {
        [self.op(), self.x(), self.y(), self.n()]
    }
}

impl From<u16> for Chip8Word {
    fn from(v: u16) -> Self {
        Chip8Word(v)
    }
}

impl core::fmt::Display for Chip8Word {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

impl Arch for Chip8 {
    type Address = u16;
    type Word = Chip8Word;
    type Instruction = Instruction;
    type Decoder = InstDecoder;
    type DecodeError = DecodeError;
    type Operand = Operand;
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DecodeError {
    /// no input available but the instruction would require at least one more word to decode
    ExhaustedInput,
    /// the word to decode does not map to a defined instruction
    Undefined,
}

impl From<yaxpeax_arch::ReadError> for DecodeError {
    fn from(_e: yaxpeax_arch::ReadError) -> Self {
        DecodeError::ExhaustedInput
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use yaxpeax_arch::DecodeError;
        f.write_str(self.description())
    }
}

impl yaxpeax_arch::DecodeError for DecodeError {
    fn data_exhausted(&self) -> bool {
        *self == DecodeError::ExhaustedInput
    }
    fn bad_opcode(&self) -> bool {
        *self == DecodeError::Undefined
    }
    fn bad_operand(&self) -> bool {
        false
    }
    fn description(&self) -> &'static str {
        match self {
            DecodeError::ExhaustedInput => "exhausted input",
            DecodeError::Undefined => "undefined encoding",
        }
    }
}

/// a CHIP-8 instruction.
///
/// CHIP-8 instructions have an [`Opcode`] and up to three [`Operand`]s. they are always exactly
/// one [`Chip8Word`] long.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Instruction {
    /// the operation of this instruction.
    opcode: Opcode,
    operands: [Operand; 3],
    length: u8,
}

impl Default for Instruction {
    fn default() -> Instruction {
        Instruction {
            opcode: Opcode::CLS,
            operands: [Operand::Nothing, Operand::Nothing, Operand::Nothing],
            length: 0,
        }
    }
}

impl Instruction {
    fn reset_operands(&mut self) {
        self.operands = [Operand::Nothing, Operand::Nothing, Operand::Nothing];
    }

    /// the length of this instruction, in terms of [`Chip8Word`].
    pub fn len(&self) -> u8 {
        self.length
    }

    /// get the number of operands in this instruction.
    ///
    /// calls to `Instruction::operand` for indices between 0 and this value will return an operand
    /// other than `Operand::Nothing`.
    pub fn operand_count(&self) -> u8 {
        self.operands.iter().take_while(|op| **op != Operand::Nothing).count() as u8
    }

    /// get the `Operand` at the provided index.
    ///
    /// indices at or above `3` will always yield `Operand::Nothing`.
    pub fn operand(&self, idx: u8) -> Operand {
        self.operands.get(idx as usize).map(|x| *x).unwrap_or(Operand::Nothing)
    }

    /// get the `Opcode` of this instruction.
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }
}

impl LengthedInstruction for Instruction {
    type Unit = AddressDiff<<Chip8 as Arch>::Address>;
    fn min_size() -> Self::Unit {
        AddressDiff::from_const(1)
    }
    fn len(&self) -> Self::Unit {
        AddressDiff::from_const(self.length as u16)
    }
}

impl yaxpeax_arch::Instruction for Instruction {
    fn well_defined(&self) -> bool { true }
}

/// an operand for a CHIP-8 instruction.
#[derive(Copy, Clone, Hash, PartialEq, Eq)]
pub enum Operand {
    /// no operand in this position.
    ///
    /// reaching this as a user of `yaxpeax_chip8` is almost certainly a bug; `Instruction::operand`
    /// only returns `Operand::Nothing` past `Instruction::operand_count`.
    Nothing,
    /// one of the sixteen general purpose registers, `V0` through `VF`
    Register(u8),
    /// a 12-bit absolute address, in the range `[0, 4095]` (inclusive).
    Address(u16),
    /// an 8-bit literal.
    Byte(u8),
    /// a 4-bit literal, used as the row count of `DRW`.
    Nibble(u8),
    /// the `I` address register
    I,
    /// memory at the address in `I`, `[I]`
    IndirectI,
    /// the delay timer, `DT`
    DelayTimer,
    /// the sound timer, `ST`
    SoundTimer,
    /// a key press, `K`
    Key,
    /// the location of a font sprite, `F`
    Font,
    /// a binary-coded decimal store at `I`, `B`
    Bcd,
}

/// a CHIP-8 instruction's operation.
///
/// opcodes name the mnemonic only; `LD` covers register, immediate, timer and memory loads alike,
/// with the operands telling them apart.
#[derive(Copy, Clone, Hash, PartialEq, Eq)]
pub enum Opcode {
    /// `Clear the display`
    CLS,
    /// `Return from subroutine`
    RET,
    /// `Jump`, to an address or to `V0` plus an address
    JP,
    /// `Call subroutine`
    CALL,
    /// `Skip next instruction if equal`
    SE,
    /// `Skip next instruction if not equal`
    SNE,
    /// `Load`
    LD,
    /// `Add`
    ADD,
    /// `Bitwise or`
    OR,
    /// `Bitwise and`
    AND,
    /// `Bitwise exclusive or`
    XOR,
    /// `Subtract`, `Vx - Vy`
    SUB,
    /// `Shift right`
    SHR,
    /// `Subtract reversed`, `Vy - Vx`
    SUBN,
    /// `Shift left`
    SHL,
    /// `Random byte masked with a literal`
    RND,
    /// `Draw sprite`
    DRW,
    /// `Skip if key pressed`
    SKP,
    /// `Skip if key not pressed`
    SKNP,
}

/// a CHIP-8 instruction decoder.
///
/// there are no decode options for CHIP-8, so this is a trivial struct that exists only for the
/// [`yaxpeax_arch::Decoder`] trait impl.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstDecoder { }

/// reads [`Chip8Word`]s out of some underlying data, either `u16` words or big-endian pairs of
/// bytes.
///
/// the cursor is a `usize` word count and only stops at the end of the data. `offset` and
/// `total_offset` truncate it to a 16-bit address.
pub struct Chip8Reader<T> {
    underlying: T,
    start: usize,
    mark: usize,
    offset: usize,
}

impl<'a> Chip8Reader<&'a [u16]> {
    pub fn of_u16(data: &'a [u16]) -> Self {
        Chip8Reader {
            underlying: data,
            start: 0,
            mark: 0,
            offset: 0,
        }
    }
}

impl<'a> Reader<u16, Chip8Word> for Chip8Reader<&'a [u16]> {
    fn next(&mut self) -> Result<Chip8Word, ReadError> {
        if let Some(word) = self.underlying.get(self.offset) {
            self.offset += 1;
            Ok(Chip8Word(*word))
        } else {
            Err(ReadError::ExhaustedInput)
        }
    }

    fn next_n(&mut self, buf: &mut [Chip8Word]) -> Result<(), ReadError> {
        if buf.len() > self.underlying.len() - self.offset {
            return Err(ReadError::ExhaustedInput);
        }

        for i in 0..buf.len() {
            buf[i] = self.next()?;
        }

        Ok(())
    }

    fn mark(&mut self) {
        self.mark = self.offset;
    }

    fn offset(&mut self) -> u16 {
        (self.offset - self.mark) as u16
    }

    fn total_offset(&mut self) -> u16 {
        (self.offset - self.start) as u16
    }
}

impl<'a> Chip8Reader<U8Reader<'a>> {
    pub fn of_u8(data: &'a [u8]) -> Self {
        Chip8Reader {
            underlying: U8Reader::new(data),
            start: 0,
            mark: 0,
            offset: 0,
        }
    }
}

impl<'a> Reader<u16, Chip8Word> for Chip8Reader<U8Reader<'a>> {
    fn next(&mut self) -> Result<Chip8Word, ReadError> {
        let high = Reader::<u16, u8>::next(&mut self.underlying)?;
        let low = Reader::<u16, u8>::next(&mut self.underlying)?;
        self.offset += 1;
        Ok(Chip8Word(u16::from_be_bytes([high, low])))
    }

    fn next_n(&mut self, buf: &mut [Chip8Word]) -> Result<(), ReadError> {
        // a failure part way through leaves the words read so far consumed.
        for i in 0..buf.len() {
            buf[i] = self.next()?;
        }

        Ok(())
    }

    fn mark(&mut self) {
        Reader::<u16, u8>::mark(&mut self.underlying);
        self.mark = self.offset;
    }

    fn offset(&mut self) -> u16 {
        (self.offset - self.mark) as u16
    }

    fn total_offset(&mut self) -> u16 {
        (self.offset - self.start) as u16
    }
}

impl InstDecoder {
    /// decode a slice of bytes into an instruction (or error)
    ///
    /// this is just a higher-level interface to the [`InstDecoder`] impl of
    /// [`yaxpeax_arch::Decoder`].
    pub fn decode_slice(data: &[u8]) -> Result<Instruction, <Chip8 as Arch>::DecodeError> {
        InstDecoder::default()
            .decode(&mut Chip8Reader::of_u8(data))
    }

    /// decode a slice of `u16` into an instruction (or error)
    ///
    /// this is just a higher-level interface to the [`InstDecoder`] impl of
    /// [`yaxpeax_arch::Decoder`].
    pub fn decode_u16(data: &[u16]) -> Result<Instruction, <Chip8 as Arch>::DecodeError> {
        InstDecoder::default()
            .decode(&mut Chip8Reader::of_u16(data))
    }

    /// decode a single instruction word. the only possible error is
    /// [`DecodeError::Undefined`].
    pub fn decode_word(word: u16) -> Result<Instruction, <Chip8 as Arch>::DecodeError> {
        InstDecoder::decode_u16(&[word])
    }
}

impl Default for InstDecoder {
    fn default() -> Self {
        InstDecoder { }
    }
}

impl Decoder<Chip8> for InstDecoder {
    fn decode_into<T: Reader<<Chip8 as Arch>::Address, <Chip8 as Arch>::Word>>(&self, inst: &mut Instruction, words: &mut T) -> Result<(), <Chip8 as Arch>::DecodeError> {
        inst.length = 0;
        inst.reset_operands();
        words.mark();
        let word = words.next()?;

        let vx = Operand::Register(word.x());
        let vy = Operand::Register(word.y());

        match word.op() {
            0x0 => {
                // `0nnn` is a machine code call on the original interpreters; only the two
                // system instructions are listed.
                inst.opcode = match word.nnn() {
                    0x0e0 => Opcode::CLS,
                    0x0ee => Opcode::RET,
                    _ => return Err(DecodeError::Undefined),
                };
            }
            0x1 => {
                inst.opcode = Opcode::JP;
                inst.operands[0] = Operand::Address(word.nnn());
            }
            0x2 => {
                inst.opcode = Opcode::CALL;
                inst.operands[0] = Operand::Address(word.nnn());
            }
            0x3 | 0x4 | 0x6 | 0x7 | 0xc => {
                const OPC: &[Option<Opcode>] = &[
                    None, None, None, Some(Opcode::SE), Some(Opcode::SNE), None, Some(Opcode::LD), Some(Opcode::ADD),
                    None, None, None, None, Some(Opcode::RND), None, None, None,
                ];
                inst.opcode = *OPC.get(word.op() as usize).and_then(|x| x.as_ref()).ok_or(DecodeError::Undefined)?;
                inst.operands[0] = vx;
                inst.operands[1] = Operand::Byte(word.kk());
            }
            // the low nibble of `5xy0` and `9xy0` is not checked.
            0x5 => {
                inst.opcode = Opcode::SE;
                inst.operands[0] = vx;
                inst.operands[1] = vy;
            }
            0x9 => {
                inst.opcode = Opcode::SNE;
                inst.operands[0] = vx;
                inst.operands[1] = vy;
            }
            0x8 => {
                // register-register alu ops, `8xyn`
                const OPC: &[Option<Opcode>] = &[
                    Some(Opcode::LD), Some(Opcode::OR), Some(Opcode::AND), Some(Opcode::XOR),
                    Some(Opcode::ADD), Some(Opcode::SUB), Some(Opcode::SHR), Some(Opcode::SUBN),
                    None, None, None, None,
                    None, None, Some(Opcode::SHL), None,
                ];
                let opcode = *OPC.get(word.n() as usize).and_then(|x| x.as_ref()).ok_or(DecodeError::Undefined)?;
                inst.opcode = opcode;
                inst.operands[0] = vx;
                if opcode != Opcode::SHR {
                    inst.operands[1] = vy;
                }
            }
            0xa => {
                inst.opcode = Opcode::LD;
                inst.operands[0] = Operand::I;
                inst.operands[1] = Operand::Address(word.nnn());
            }
            0xb => {
                inst.opcode = Opcode::JP;
                inst.operands[0] = Operand::Register(0);
                inst.operands[1] = Operand::Address(word.nnn());
            }
            0xd => {
                inst.opcode = Opcode::DRW;
                inst.operands = [vx, vy, Operand::Nibble(word.n())];
            }
            0xe => {
                inst.opcode = match word.kk() {
                    0x9e => Opcode::SKP,
                    0xa1 => Opcode::SKNP,
                    _ => return Err(DecodeError::Undefined),
                };
                inst.operands[0] = vx;
            }
            // 0xf
            _ => {
                // timers, keys, `I` and memory, all keyed on `kk`
                let (opcode, dest, src) = match word.kk() {
                    0x07 => (Opcode::LD, vx, Operand::DelayTimer),
                    0x0a => (Opcode::LD, vx, Operand::Key),
                    0x15 => (Opcode::LD, Operand::DelayTimer, vx),
                    0x18 => (Opcode::LD, Operand::SoundTimer, vx),
                    0x1e => (Opcode::ADD, Operand::I, vx),
                    0x29 => (Opcode::LD, Operand::Font, vx),
                    0x33 => (Opcode::LD, Operand::Bcd, vx),
                    0x55 => (Opcode::LD, Operand::IndirectI, vx),
                    0x65 => (Opcode::LD, vx, Operand::IndirectI),
                    _ => return Err(DecodeError::Undefined),
                };
                inst.opcode = opcode;
                inst.operands[0] = dest;
                inst.operands[1] = src;
            }
        }

        inst.length = words.offset() as u8;
        Ok(())
    }
}
