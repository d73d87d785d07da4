use yaxpeax_arch::{Decoder, Reader, ReadError};
use yaxpeax_arch::DecodeError as _;

use yaxpeax_chip8::{Chip8Word, DecodeError, InstDecoder, Opcode, Operand};

fn test_display(data: &[u16], expected: &'static str) {
    let mut reader = yaxpeax_chip8::Chip8Reader::of_u16(data);
    match yaxpeax_chip8::InstDecoder::default().decode(&mut reader) {
        Ok(instr) => {
            let displayed = instr.to_string();
            assert_eq!(&displayed, expected);
            assert_eq!(data.len() as u8, instr.len());
        }
        Err(e) => {
            let mut msg = "failed to decode".to_owned();
            if data.len() > 0 {
                msg.push_str(" [");
                msg.push_str(&format!("{:04x}", data[0]));
                for i in 1..data.len() {
                    msg.push_str(", ");
                    msg.push_str(&format!("{:04x}", data[i]));
                }
                msg.push_str("]");
            }
            msg.push_str(": ");
            msg.push_str(&e.to_string());
            panic!("{}", msg);
        }
    }
}

fn test_undefined(word: u16) {
    match InstDecoder::decode_word(word) {
        Ok(instr) => panic!("{:04x} decoded to `{}`, expected undefined", word, instr),
        Err(e) => {
            assert_eq!(e, DecodeError::Undefined);
            assert!(e.bad_opcode());
            assert!(!e.data_exhausted());
        }
    }
}

#[test]
fn test_decoder_does_not_panic() {
    for i in 0..=0xffffu16 {
        let data = &[i];
        let mut reader = yaxpeax_chip8::Chip8Reader::of_u16(data);
        match yaxpeax_chip8::InstDecoder::default().decode(&mut reader) {
            Ok(instr) => {
                let displayed = instr.to_string();
                assert!(displayed.len() > 0);
                assert_eq!(instr.len(), 1);
            }
            Err(e) => {
                let displayed = e.to_string();
                assert!(displayed.len() > 0);
                assert!(e.bad_opcode());
            }
        }
    }
}

#[test]
fn test_nibbles() {
    for i in 0..=0xffffu16 {
        let word = Chip8Word::new(i);
        let [op, x, y, n] = word.nibbles();
        let (op, x, y, n) = (op as u16, x as u16, y as u16, n as u16);
        assert_eq!(i, op << 12 | x << 8 | y << 4 | n);
        assert_eq!(word.nnn(), x << 8 | y << 4 | n);
        assert_eq!(word.kk() as u16, y << 4 | n);
    }

    let word = Chip8Word::from(0x1234);
    assert_eq!(word.op(), 0x1);
    assert_eq!(word.x(), 0x2);
    assert_eq!(word.y(), 0x3);
    assert_eq!(word.n(), 0x4);
    assert_eq!(word.kk(), 0x34);
    assert_eq!(word.nnn(), 0x234);
    assert_eq!(word.to_string(), "1234");
}

#[test]
fn test_disassembly() {
    test_display(&[0x00e0], "CLS");
    test_display(&[0x00ee], "RET");
    test_display(&[0x1234], "JP 0x234");
    test_display(&[0x1000], "JP 0x0");
    test_display(&[0x1200], "JP 0x200"); // the usual `halt`, a jump to itself at the origin
    test_display(&[0x2345], "CALL 0x345");
    test_display(&[0x3456], "SE V4, 0x56");
    test_display(&[0x4567], "SNE V5, 0x67");
    test_display(&[0x6123], "LD V1, 0x23");
    test_display(&[0x6f05], "LD VF, 0x05");
    test_display(&[0x7234], "ADD V2, 0x34");
    test_display(&[0x8230], "LD V2, V3");
    test_display(&[0x8341], "OR V3, V4");
    test_display(&[0x8562], "AND V5, V6");
    test_display(&[0x8563], "XOR V5, V6");
    test_display(&[0x8674], "ADD V6, V7");
    test_display(&[0x8785], "SUB V7, V8");
    test_display(&[0x8786], "SHR V7");
    test_display(&[0x8787], "SUBN V7, V8");
    test_display(&[0x878e], "SHL V7, V8");
    test_display(&[0x9120], "SNE V1, V2");
    test_display(&[0x9ab7], "SNE VA, VB");
    test_display(&[0xa123], "LD I, 0x123");
    test_display(&[0xa2f0], "LD I, 0x2f0");
    test_display(&[0xb123], "JP V0, 0x123");
    test_display(&[0xc1ff], "RND V1, 0xff");
    test_display(&[0xd123], "DRW V1, V2, 0x03");
    test_display(&[0xdabf], "DRW VA, VB, 0x0f");
    test_display(&[0xe19e], "SKP V1");
    test_display(&[0xe1a1], "SKNP V1");
    test_display(&[0xf107], "LD V1, DT");
    test_display(&[0xf10a], "LD V1, K");
    test_display(&[0xf115], "LD DT, V1");
    test_display(&[0xf118], "LD ST, V1");
    test_display(&[0xf11e], "ADD I, V1");
    test_display(&[0xf129], "LD F, V1");
    test_display(&[0xf133], "LD B, V1");
    test_display(&[0xf155], "LD [I], V1");
    test_display(&[0xf165], "LD V1, [I]");
    test_display(&[0xfe65], "LD VE, [I]");
}

#[test]
fn test_register_compare_listing() {
    // `5xy0` prints its second register as a byte.
    test_display(&[0x5120], "SE V1, 0x02");
    test_display(&[0x5ab0], "SE VA, 0x0b");
    // and does not look at the low nibble.
    test_display(&[0x5ab7], "SE VA, 0x0b");

    let inst = InstDecoder::decode_word(0x5ab0).unwrap();
    assert_eq!(inst.opcode(), Opcode::SE);
    assert_eq!(inst.operand(0), Operand::Register(0xa));
    assert_eq!(inst.operand(1), Operand::Register(0xb));
}

#[test]
fn test_undefined_words() {
    test_undefined(0x0000);
    test_undefined(0x0abc);
    test_undefined(0x00e1);
    test_undefined(0x01e0);
    test_undefined(0x8008);
    test_undefined(0x800d);
    test_undefined(0x800f);
    test_undefined(0xe100);
    test_undefined(0xe19f);
    test_undefined(0xf100);
    test_undefined(0xf1ff);
}

#[test]
fn test_load_immediate_all_registers() {
    for x in 0..=0xfu16 {
        for kk in 0..=0xffu16 {
            let word = 0x6000 | x << 8 | kk;
            let inst = InstDecoder::decode_word(word).unwrap();
            assert_eq!(inst.to_string(), format!("LD V{:X}, 0x{:02x}", x, kk));
        }
    }
}

#[test]
fn test_operands() {
    let inst = InstDecoder::decode_word(0x00e0).unwrap();
    assert_eq!(inst.opcode(), Opcode::CLS);
    assert_eq!(inst.operand_count(), 0);
    assert_eq!(inst.operand(0), Operand::Nothing);

    let inst = InstDecoder::decode_word(0x8ab6).unwrap();
    assert_eq!(inst.opcode(), Opcode::SHR);
    assert_eq!(inst.operand_count(), 1);
    assert_eq!(inst.operand(0), Operand::Register(0xa));

    let inst = InstDecoder::decode_word(0xb3c4).unwrap();
    assert_eq!(inst.opcode(), Opcode::JP);
    assert_eq!(inst.operand_count(), 2);
    assert_eq!(inst.operand(0), Operand::Register(0));
    assert_eq!(inst.operand(1), Operand::Address(0x3c4));

    let inst = InstDecoder::decode_word(0xf555).unwrap();
    assert_eq!(inst.opcode(), Opcode::LD);
    assert_eq!(inst.operand(0), Operand::IndirectI);
    assert_eq!(inst.operand(1), Operand::Register(5));

    let inst = InstDecoder::decode_word(0xf007).unwrap();
    assert_eq!(inst.operand(1), Operand::DelayTimer);
    assert_eq!(inst.operand(3), Operand::Nothing);
    assert_eq!(inst.operand(200), Operand::Nothing);
}

#[test]
fn test_decode_slice() {
    let inst = InstDecoder::decode_slice(&[0xa2, 0xf0]).unwrap();
    assert_eq!(inst.to_string(), "LD I, 0x2f0");

    // only the first word is consumed
    let inst = InstDecoder::decode_slice(&[0x00, 0xee, 0x00, 0xe0]).unwrap();
    assert_eq!(inst.opcode(), Opcode::RET);

    let err = InstDecoder::decode_slice(&[0x12]).unwrap_err();
    assert_eq!(err, DecodeError::ExhaustedInput);
    assert!(err.data_exhausted());

    let err = InstDecoder::decode_slice(&[]).unwrap_err();
    assert_eq!(err, DecodeError::ExhaustedInput);

    let err = InstDecoder::decode_u16(&[]).unwrap_err();
    assert_eq!(err, DecodeError::ExhaustedInput);
    assert_eq!(err.to_string(), "exhausted input");
}

#[test]
fn test_reader_stops_past_address_space() {
    let mut data = vec![0x1200u16; 0x10000];
    data[0] = 0x00e0;
    let mut reader = yaxpeax_chip8::Chip8Reader::of_u16(&data);
    for i in 0..0x10000usize {
        let word = reader.next().unwrap();
        assert_eq!(word.value(), data[i]);
    }
    assert!(matches!(reader.next(), Err(ReadError::ExhaustedInput)));
    assert!(matches!(reader.next(), Err(ReadError::ExhaustedInput)));

    let mut buf = [Chip8Word::new(0); 1];
    assert!(matches!(reader.next_n(&mut buf), Err(ReadError::ExhaustedInput)));
}

#[test]
fn test_reader_offsets() {
    let data = [0x00e0u16, 0x00ee, 0x1200];
    let mut reader = yaxpeax_chip8::Chip8Reader::of_u16(&data);
    reader.next().unwrap();
    reader.mark();
    reader.next().unwrap();
    assert_eq!(reader.offset(), 1);
    assert_eq!(reader.total_offset(), 2);

    let mut reader = yaxpeax_chip8::Chip8Reader::of_u8(&[0x00, 0xe0, 0x12]);
    assert_eq!(reader.next().unwrap().value(), 0x00e0);
    assert!(matches!(reader.next(), Err(ReadError::ExhaustedInput)));
}
