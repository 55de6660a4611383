//! cricket: a headless Chip-8 interpreter
//!
//! Peripheral glue only: argument parsing, ROM loading, and a paced step
//! loop around [cricket::Chip8]. All emulation lives in the library.

use cricket::prelude::*;
use gumdrop::Options;
use owo_colors::OwoColorize;
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    thread,
    time::Duration,
};

#[derive(Clone, Debug, PartialEq, Eq, Options)]
struct Arguments {
    #[options(help = "Load a ROM image to run.", required, free)]
    file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Trace each cycle on stdout.")]
    debug: bool,
    #[options(help = "Stop after N cycles. If unspecified, run forever.", meta = "N")]
    cycles: Option<usize>,
    #[options(help = "Set the instructions-per-second rate.", default = "500", meta = "HZ")]
    speed: u64,
    #[options(help = "Print the framebuffer on exit.")]
    screen: bool,
    #[options(help = "Cap the call stack at 16 frames like the original hardware.")]
    strict: bool,
}

fn main() -> ExitCode {
    let options = Arguments::parse_args_default_or_exit();
    let Some(rom) = read_rom(&options.file) else {
        eprintln!(
            "{} no readable ROM at {}",
            "error:".bold().red(),
            options.file.display()
        );
        return ExitCode::FAILURE;
    };

    let stack = if options.strict {
        CallStack::bounded(16)
    } else {
        CallStack::unbounded()
    };
    let mut ch8 = Chip8 {
        cpu: CPU::new(stack),
        ..Default::default()
    };
    ch8.cpu.debug = options.debug;
    if let Err(e) = ch8.load_program(&rom) {
        eprintln!("{}", e.bold().red());
        return ExitCode::FAILURE;
    }

    let mut rng = rand::thread_rng();
    let pace = Duration::from_micros(1_000_000 / options.speed.max(1));
    let mut ran = 0;
    while options.cycles.map_or(true, |max| ran < max) {
        if let Err(e) = ch8.step(&mut rng) {
            eprintln!("{}", e.bold().red());
            return ExitCode::FAILURE;
        }
        ran += 1;
        thread::sleep(pace);
    }
    if options.screen {
        print!("{}", ch8.screen);
    }
    ExitCode::SUCCESS
}

/// Reads a program image from disk. The image is opaque bytes with no
/// header; an unreadable path is reported as an absence, not an error.
fn read_rom(path: &Path) -> Option<Vec<u8>> {
    std::fs::read(path).ok()
}
