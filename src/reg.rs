//! The sixteen 8-bit general purpose registers, `v0..=vF`
//!
//! `vF` doubles as the flag register: carry, borrow, shifted-out bit, and
//! sprite collision all land there as side effects, so programs use it as
//! a general register at their own peril. Flag-producing opcodes compute
//! `(new_vx, new_vf)` explicitly in [crate::cpu] and store both through
//! [RegisterFile::set]; nothing mutates the file from inside a transform.

/// Zero-initialized register file. Index contract: `reg` in `[0, 16)`,
/// guaranteed for all callers by opcode decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    v: [u8; 16],
}

/// Register index of the flag register, `vF`.
pub const FLAG: usize = 0xF;

impl RegisterFile {
    /// Reads register `reg`.
    pub fn get(&self, reg: usize) -> u8 {
        self.v[reg]
    }

    /// Writes `value` to register `reg`. Values are `u8`, so wraparound
    /// mod 256 holds by construction.
    pub fn set(&mut self, reg: usize, value: u8) {
        self.v[reg] = value;
    }

    /// Applies a pure transform to register `reg`, storing the result.
    ///
    /// # Examples
    /// ```rust
    /// # use cricket::reg::RegisterFile;
    /// let mut regs = RegisterFile::default();
    /// regs.set(0x4, 0xFE);
    /// regs.apply(0x4, |v4| v4.wrapping_add(3));
    /// assert_eq!(0x01, regs.get(0x4));
    /// ```
    pub fn apply(&mut self, reg: usize, transform: impl FnOnce(u8) -> u8) {
        self.v[reg] = transform(self.v[reg]);
    }

    /// All sixteen registers in order, for block load/store opcodes.
    pub fn as_slice(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Zeroes every register.
    pub fn reset(&mut self) {
        self.v = [0; 16];
    }
}
