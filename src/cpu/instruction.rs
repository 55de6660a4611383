#![allow(clippy::bad_bit_mask)]
//! Decoding of the 35 machine instructions
//!
//! One instruction word is two big-endian bytes. The fixed sub-fields
//! (`x`, `y`, `n`, `kk`, `nnn`) fall out of the bit patterns below; the
//! [imperative_rs::InstructionSet] derive turns them into typed fields.

use imperative_rs::InstructionSet;

/// One recognized instruction.
///
/// Registers decode as `usize` (always `0..16`), immediate bytes as `u8`,
/// and addresses as `u16` (always `0..0x1000`).
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq)]
pub enum Insn {
    /// |`00E0`| Clear the screen
    #[opcode = "0x00e0"]
    Cls,
    /// |`00EE`| Return from subroutine
    #[opcode = "0x00ee"]
    Ret,
    /// |`1nnn`| Jump to address nnn
    #[opcode = "0x1nnn"]
    Jump { n: u16 },
    /// |`2nnn`| Push pc, then jump to address nnn
    #[opcode = "0x2nnn"]
    Call { n: u16 },
    /// |`3xkk`| Skip next instruction if vX == kk
    #[opcode = "0x3xkk"]
    SkipEqB { x: usize, k: u8 },
    /// |`4xkk`| Skip next instruction if vX != kk
    #[opcode = "0x4xkk"]
    SkipNeB { x: usize, k: u8 },
    /// |`5xy0`| Skip next instruction if vX == vY
    #[opcode = "0x5xy0"]
    SkipEq { x: usize, y: usize },
    /// |`6xkk`| vX = kk
    #[opcode = "0x6xkk"]
    LoadB { x: usize, k: u8 },
    /// |`7xkk`| vX += kk, no carry tracked
    #[opcode = "0x7xkk"]
    AddB { x: usize, k: u8 },
    /// |`8xy0`| vX = vY
    #[opcode = "0x8xy0"]
    Move { x: usize, y: usize },
    /// |`8xy1`| vX |= vY
    #[opcode = "0x8xy1"]
    Or { x: usize, y: usize },
    /// |`8xy2`| vX &= vY
    #[opcode = "0x8xy2"]
    And { x: usize, y: usize },
    /// |`8xy3`| vX ^= vY
    #[opcode = "0x8xy3"]
    Xor { x: usize, y: usize },
    /// |`8xy4`| vX += vY, vF = carry
    #[opcode = "0x8xy4"]
    Add { x: usize, y: usize },
    /// |`8xy5`| vX -= vY, vF = no borrow
    #[opcode = "0x8xy5"]
    Sub { x: usize, y: usize },
    /// |`8xy6`| vF = vX & 1, then vX >>= 1
    #[opcode = "0x8xy6"]
    ShiftRight { x: usize, y: usize },
    /// |`8xy7`| vX = vY - vX, vF = no borrow
    #[opcode = "0x8xy7"]
    SubFrom { x: usize, y: usize },
    /// |`8xyE`| vF = top bit of vX, then vX <<= 1
    #[opcode = "0x8xye"]
    ShiftLeft { x: usize, y: usize },
    /// |`9xy0`| Skip next instruction if vX != vY
    #[opcode = "0x9xy0"]
    SkipNe { x: usize, y: usize },
    /// |`Annn`| I = nnn
    #[opcode = "0xannn"]
    LoadI { n: u16 },
    /// |`Bnnn`| Jump to v0 + nnn, masked to 12 bits
    #[opcode = "0xbnnn"]
    JumpV0 { n: u16 },
    /// |`Cxkk`| vX = random byte & kk
    #[opcode = "0xcxkk"]
    Rand { x: usize, k: u8 },
    /// |`Dxyn`| Draw the n-row sprite at memory[I..] to (vX, vY)
    #[opcode = "0xdxyn"]
    Draw { x: usize, y: usize, n: u8 },
    /// |`Ex9E`| Skip next instruction if key vX is pressed
    #[opcode = "0xex9e"]
    SkipKey { x: usize },
    /// |`ExA1`| Skip next instruction if key vX is not pressed
    #[opcode = "0xexa1"]
    SkipNoKey { x: usize },
    /// |`Fx07`| vX = delay timer
    #[opcode = "0xfx07"]
    GetDelay { x: usize },
    /// |`Fx0A`| Wait for a key press, store the key in vX
    #[opcode = "0xfx0a"]
    WaitKey { x: usize },
    /// |`Fx15`| delay timer = vX
    #[opcode = "0xfx15"]
    SetDelay { x: usize },
    /// |`Fx18`| sound timer = vX
    #[opcode = "0xfx18"]
    SetSound { x: usize },
    /// |`Fx1E`| I += vX, unmasked
    #[opcode = "0xfx1e"]
    AddI { x: usize },
    /// |`Fx29`| I = font glyph address for digit vX
    #[opcode = "0xfx29"]
    Font { x: usize },
    /// |`Fx33`| memory[I..I+3] = decimal digits of vX
    #[opcode = "0xfx33"]
    Bcd { x: usize },
    /// |`Fx55`| memory[I..=I+x] = v0..=vX
    #[opcode = "0xfx55"]
    Store { x: usize },
    /// |`Fx65`| v0..=vX = memory[I..=I+x]
    #[opcode = "0xfx65"]
    Load { x: usize },
}

/// Outcome of decoding one instruction word.
///
/// Words outside the recognized set are not an error: the target machine
/// treated them permissively, and existing program images probe undefined
/// opcodes. They decode to an explicit [Decoded::NoOp] so the permissive
/// branch is visible instead of a fallthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// One of the 35 defined instructions
    Op(Insn),
    /// Anything else, defined to execute as nothing
    NoOp(u16),
}

/// Decodes one big-endian instruction word.
pub fn decode(word: u16) -> Decoded {
    match Insn::decode(&word.to_be_bytes()) {
        Ok((_, insn)) => Decoded::Op(insn),
        Err(_) => Decoded::NoOp(word),
    }
}
