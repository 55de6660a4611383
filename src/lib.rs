//! This crate implements the instruction set of the Chip-8 virtual
//! machine: 35 opcodes over a 4 KB address space, sixteen 8-bit
//! registers, a call stack, two timers, and a 64x32 XOR framebuffer.
//!
//! The interpreter core is [cpu::CPU]: one [cpu::CPU::step] call runs
//! exactly one fetch-decode-execute cycle against injected collaborators.
//! Display, keyboard sampling, and pacing live outside the crate; the
//! bundled [Chip8] wires the core to default in-memory collaborators for
//! hosts that don't need their own.

pub mod cpu;
pub mod error;
pub mod keypad;
pub mod mem;
pub mod reg;
pub mod rng;
pub mod screen;
pub mod stack;

use crate::{
    cpu::CPU, error::Result, keypad::Keys, mem::Memory, reg::RegisterFile, rng::RandomByte,
    screen::Framebuffer,
};

/// A complete machine: the interpreter core plus default collaborators.
///
/// # Examples
/// ```rust
/// # use cricket::prelude::*;
/// # use rand::rngs::mock::StepRng;
/// let mut ch8 = Chip8::default();
/// ch8.load_program(&[0x60, 0x01, 0x70, 0x01]).unwrap();
/// let mut rng = StepRng::new(0, 1);
/// ch8.step(&mut rng).unwrap();
/// ch8.step(&mut rng).unwrap();
/// assert_eq!(2, ch8.regs.get(0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chip8 {
    pub cpu: CPU,
    pub mem: Memory,
    pub regs: RegisterFile,
    pub screen: Framebuffer,
    pub keys: Keys,
}

impl Chip8 {
    /// Loads a program image at the standard start address.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.load_program(rom)?;
        Ok(self)
    }

    /// Runs one interpreter cycle with the bundled collaborators.
    pub fn step(&mut self, rng: &mut impl RandomByte) -> Result<&mut Self> {
        self.cpu
            .step(&mut self.mem, &mut self.regs, &mut self.screen, &self.keys, rng)?;
        Ok(self)
    }

    /// Presses a keypad key. See [Keys::press].
    pub fn press(&mut self, key: usize) -> Result<bool> {
        self.keys.press(key)
    }

    /// Releases a keypad key. See [Keys::release].
    pub fn release(&mut self, key: usize) -> Result<bool> {
        self.keys.release(key)
    }
}

/// Common imports for cricket
pub mod prelude {
    pub use crate::{
        cpu::{instruction::Insn, CPU},
        error::{Error, Result},
        keypad::{Keypad, Keys},
        mem::Memory,
        reg::RegisterFile,
        rng::RandomByte,
        screen::{Framebuffer, Screen},
        stack::CallStack,
        Chip8,
    };
}
