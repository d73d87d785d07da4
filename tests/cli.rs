#![cfg(feature = "cli")]

use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

fn chip8dis() -> Command {
    Command::new(env!("CARGO_BIN_EXE_chip8dis"))
}

#[test]
fn test_lists_rom() {
    let mut rom = NamedTempFile::new().unwrap();
    rom.write_all(&[0x00, 0xe0, 0x12, 0x00, 0xff]).unwrap();

    let output = chip8dis().arg(rom.path()).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "0200: 00e0: CLS               ________ ***_____\n\
         0202: 1200: JP 0x200          ___*__*_ ________\n"
    );
}

#[test]
fn test_empty_rom() {
    let rom = NamedTempFile::new().unwrap();

    let output = chip8dis().arg(rom.path()).output().unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_rom_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.ch8");

    let output = chip8dis().arg(&missing).output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to read rom"), "{}", stderr);
    assert!(stderr.contains("missing.ch8"), "{}", stderr);
}

#[test]
fn test_rom_argument_required() {
    let output = chip8dis().output().unwrap();
    assert!(!output.status.success());
}
