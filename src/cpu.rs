//! The fetch-decode-execute engine
//!
//! [CPU::step] interprets exactly one instruction per call. There is no
//! internal loop, sleep, or timing: the driving cadence is entirely the
//! caller's business, and the "blocking" wait-for-key instruction is a
//! cooperative re-arm (the program counter rewinds over it) rather than
//! a real block, so a host loop stays free to pump input between calls.


pub mod behavior;
pub mod instruction;

use self::instruction::{decode, Decoded};
use crate::{
    error::Result,
    keypad::Keypad,
    mem::Memory,
    reg::RegisterFile,
    rng::RandomByte,
    screen::Screen,
    stack::CallStack,
};
use owo_colors::OwoColorize;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Internal state of the interpreter.
///
/// Memory, registers, screen, keypad, and randomness are injected into
/// every [CPU::step] call; the CPU owns only what nothing else reads
/// concurrently: the program counter, index register, timers, call
/// stack, and a couple of diagnostic fields.
#[derive(Clone, Debug, PartialEq)]
pub struct CPU {
    pc: Adr,
    i: Adr,
    delay: u8,
    sound: u8,
    stack: CallStack,
    font: Adr,
    // diagnostics
    cycle: usize,
    draw: bool,
    /// Set to trace each cycle on stdout
    pub debug: bool,
}

impl CPU {
    /// Constructs a CPU with the given call stack configuration.
    ///
    /// # Examples
    /// ```rust
    /// # use cricket::prelude::*;
    /// // reference hardware allowed 16 nested calls
    /// let cpu = CPU::new(CallStack::bounded(16));
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn new(stack: CallStack) -> Self {
        CPU {
            pc: Memory::PROGRAM_BASE,
            i: 0,
            delay: 0,
            sound: 0,
            stack,
            font: Memory::FONT_BASE,
            cycle: 0,
            draw: false,
            debug: false,
        }
    }

    /// Runs one fetch-decode-execute cycle.
    ///
    /// The program counter advances past the fetched instruction *before*
    /// dispatch, so every control-flow instruction assigns its target
    /// outright instead of compensating for the advance. After a
    /// successful dispatch both timers tick down toward zero.
    ///
    /// A returned error leaves the failing access unapplied; see
    /// [crate::error::Error] for the conditions.
    ///
    /// # Examples
    /// ```rust
    /// # use cricket::prelude::*;
    /// # use rand::rngs::mock::StepRng;
    /// let mut cpu = CPU::default();
    /// let mut mem = Memory::default();
    /// let mut regs = RegisterFile::default();
    /// let mut fb = Framebuffer::default();
    /// let keys = Keys::default();
    /// mem.load_program(&[0x60, 0x2A]).unwrap(); // v0 = 42
    /// cpu.step(&mut mem, &mut regs, &mut fb, &keys, &mut StepRng::new(0, 1))
    ///     .unwrap();
    /// assert_eq!(42, regs.get(0));
    /// assert_eq!(0x202, cpu.pc());
    /// ```
    pub fn step(
        &mut self,
        mem: &mut Memory,
        regs: &mut RegisterFile,
        screen: &mut impl Screen,
        keys: &impl Keypad,
        rng: &mut impl RandomByte,
    ) -> Result<&mut Self> {
        let word = mem.fetch_opcode(self.pc)?;
        self.cycle += 1;
        if self.debug {
            println!("{:3} {:03x}: {:04x}", self.cycle.bright_black(), self.pc, word);
        }
        self.pc = self.pc.wrapping_add(2);
        match decode(word) {
            Decoded::Op(insn) => self.execute(mem, regs, screen, keys, rng, insn)?,
            Decoded::NoOp(word) => {
                // permissive by design: undefined words execute as nothing
                if self.debug {
                    println!("         {:04x} {}", word, "noop".bright_black());
                }
            }
        }
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
        Ok(self)
    }

    /// Gets the program counter.
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the index register.
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the delay timer.
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the sound timer. Whether anything beeps is up to the host;
    /// the core only counts it down.
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Gets the number of cycles executed so far.
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Gets the call stack.
    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    /// True if the screen changed since the flag was last cleared.
    pub fn draw_flag(&self) -> bool {
        self.draw
    }

    /// Clears or sets the display-dirty flag, typically after a redraw.
    pub fn set_draw_flag(&mut self, value: bool) {
        self.draw = value;
    }

    /// Rewinds execution state to power-on: the pc at the program start, the
    /// call stack empty, index/timers/cycle count zeroed. Memory and
    /// collaborators are left alone.
    pub fn reset(&mut self) {
        self.pc = Memory::PROGRAM_BASE;
        self.i = 0;
        self.delay = 0;
        self.sound = 0;
        self.cycle = 0;
        self.draw = false;
        self.stack.clear();
    }
}

impl Default for CPU {
    /// A CPU with an unbounded call stack, ready to run from 0x200.
    fn default() -> Self {
        CPU::new(CallStack::unbounded())
    }
}
