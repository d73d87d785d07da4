use core::fmt;

use crate::{Opcode, Operand, Instruction};

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // `5xy0` compares two registers, but existing chip-8 listings print `y` as a byte literal.
        // listings produced here have to line up with those, so only the text keeps that form.
        if let (Opcode::SE, Operand::Register(x), Operand::Register(y)) = (self.opcode, self.operands[0], self.operands[1]) {
            return write!(f, "SE V{:X}, 0x{:02x}", x, y);
        }

        write!(f, "{}", self.opcode)?;
        for i in 0..self.operand_count() {
            if i == 0 {
                f.write_str(" ")?;
            } else {
                f.write_str(", ")?;
            }
            write!(f, "{}", self.operands[i as usize])?;
        }
        Ok(())
    }
}

impl fmt::Debug for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        <Operand as fmt::Display>::fmt(self, f)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use crate::Operand::*;
        match self {
            Nothing => f.write_str("BUG"),
            Register(reg) => write!(f, "V{:X}", reg),
            Address(addr) => write!(f, "0x{:x}", addr),
            Byte(value) => write!(f, "0x{:02x}", value),
            Nibble(value) => write!(f, "0x{:02x}", value),
            I => f.write_str("I"),
            IndirectI => f.write_str("[I]"),
            DelayTimer => f.write_str("DT"),
            SoundTimer => f.write_str("ST"),
            Key => f.write_str("K"),
            Font => f.write_str("F"),
            Bcd => f.write_str("B"),
        }
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        <Opcode as fmt::Display>::fmt(self, f)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Opcode::CLS => {
                f.write_str("CLS")
            },
            Opcode::RET => {
                f.write_str("RET")
            },
            Opcode::JP => {
                f.write_str("JP")
            },
            Opcode::CALL => {
                f.write_str("CALL")
            },
            Opcode::SE => {
                f.write_str("SE")
            },
            Opcode::SNE => {
                f.write_str("SNE")
            },
            Opcode::LD => {
                f.write_str("LD")
            },
            Opcode::ADD => {
                f.write_str("ADD")
            },
            Opcode::OR => {
                f.write_str("OR")
            },
            Opcode::AND => {
                f.write_str("AND")
            },
            Opcode::XOR => {
                f.write_str("XOR")
            },
            Opcode::SUB => {
                f.write_str("SUB")
            },
            Opcode::SHR => {
                f.write_str("SHR")
            },
            Opcode::SUBN => {
                f.write_str("SUBN")
            },
            Opcode::SHL => {
                f.write_str("SHL")
            },
            Opcode::RND => {
                f.write_str("RND")
            },
            Opcode::DRW => {
                f.write_str("DRW")
            },
            Opcode::SKP => {
                f.write_str("SKP")
            },
            Opcode::SKNP => {
                f.write_str("SKNP")
            },
        }
    }
}
