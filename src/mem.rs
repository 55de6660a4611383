//! The 4 KB address space: font table, program image, and scratch memory
//!
//! Addresses below [Memory::PROGRAM_BASE] are interpreter territory. The
//! font glyphs are written there once at construction and a well-behaved
//! program never touches them again, but nothing enforces that: a store
//! through the index register may target any address in `[0, 4096)`.

use crate::error::{Error, Result};

/// Builtin glyphs for the hex digits `0..=F`, 5 bytes per digit, one bit
/// per pixel with the leftmost pixel in the high bit.
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0x80, // E
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // F
];

/// Flat byte store covering the whole machine address space.
///
/// # Examples
/// ```rust
/// # use cricket::prelude::*;
/// let mut mem = Memory::default();
/// mem.load_program(&[0x60, 0x01]).unwrap();
/// assert_eq!(0x6001, mem.fetch_opcode(0x200).unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    bytes: [u8; Self::SIZE],
}

impl Memory {
    /// Total addressable bytes
    pub const SIZE: usize = 4096;
    /// Where [FONT] lives
    pub const FONT_BASE: u16 = 0x050;
    /// Where the program image starts, and where execution begins
    pub const PROGRAM_BASE: u16 = 0x200;

    /// Copies a program image into memory starting at
    /// [Memory::PROGRAM_BASE], clearing out whatever image was there
    /// before. Fails with [Error::ProgramTooLarge] if the image does not
    /// fit; memory is untouched in that case.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<&mut Self> {
        let base = Self::PROGRAM_BASE as usize;
        let max = Self::SIZE - base;
        if rom.len() > max {
            return Err(Error::ProgramTooLarge { len: rom.len(), max });
        }
        self.bytes[base..].fill(0);
        self.bytes[base..base + rom.len()].copy_from_slice(rom);
        Ok(self)
    }

    /// Reads one byte. Out-of-range addresses are a contract violation,
    /// reported as [Error::AddressOutOfRange] rather than clamped.
    pub fn read(&self, addr: u16) -> Result<u8> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(Error::AddressOutOfRange { addr })
    }

    /// Writes one byte.
    pub fn write(&mut self, addr: u16, value: u8) -> Result<()> {
        match self.bytes.get_mut(addr as usize) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(Error::AddressOutOfRange { addr }),
        }
    }

    /// Borrows `len` bytes starting at `addr`, validating the whole range
    /// up front so multi-byte operations either see every byte or none.
    pub fn slice(&self, addr: u16, len: usize) -> Result<&[u8]> {
        let start = addr as usize;
        self.bytes
            .get(start..start + len)
            .ok_or(Error::AddressOutOfRange { addr: last(addr, len) })
    }

    /// Mutable counterpart of [Memory::slice].
    pub fn slice_mut(&mut self, addr: u16, len: usize) -> Result<&mut [u8]> {
        let start = addr as usize;
        self.bytes
            .get_mut(start..start + len)
            .ok_or(Error::AddressOutOfRange { addr: last(addr, len) })
    }

    /// Fetches the big-endian 16-bit instruction word at `pc`.
    pub fn fetch_opcode(&self, pc: u16) -> Result<u16> {
        let hi = self.read(pc)?;
        let lo = self.read(pc.wrapping_add(1))?;
        Ok(u16::from_be_bytes([hi, lo]))
    }
}

impl Default for Memory {
    /// Zeroed memory with the font table in place.
    fn default() -> Self {
        let mut bytes = [0; Self::SIZE];
        let base = Self::FONT_BASE as usize;
        bytes[base..base + FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }
}

/// Last address of a `len`-byte access at `addr`, for error reporting.
fn last(addr: u16, len: usize) -> u16 {
    addr.saturating_add(len.saturating_sub(1) as u16)
}
