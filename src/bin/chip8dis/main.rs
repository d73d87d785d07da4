use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, warn};

use yaxpeax_chip8::{Listing, ROM_SIZE};

#[derive(Parser, Debug)]
#[command(version, about = "chip-8 disassembler")]
struct Args {
    /// path to the rom file
    rom: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rom = fs::read(&args.rom)
        .with_context(|| format!("failed to read rom {}", args.rom.display()))?;
    debug!("read {} bytes from {}", rom.len(), args.rom.display());

    if rom.len() > ROM_SIZE {
        warn!(
            "{} is {} bytes, larger than the {} bytes of program memory",
            args.rom.display(),
            rom.len(),
            ROM_SIZE
        );
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in Listing::new(&rom) {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    Ok(())
}
