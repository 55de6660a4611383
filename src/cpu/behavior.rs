//! Contains implementations for each machine [Insn]
//!
//! Every method here runs after the program counter has already moved
//! past its instruction, so control flow assigns absolute targets and
//! skips simply add 2. Methods that touch memory validate the whole
//! access before mutating anything: a failed instruction commits none
//! of its effects.

use super::{instruction::Insn, Adr, Nib, Reg, CPU};
use crate::{
    error::Result,
    keypad::Keypad,
    mem::Memory,
    reg::{RegisterFile, FLAG},
    rng::RandomByte,
    screen::Screen,
};

impl CPU {
    /// Executes a single [Insn] against the injected collaborators.
    #[rustfmt::skip]
    pub(super) fn execute(
        &mut self,
        mem: &mut Memory,
        regs: &mut RegisterFile,
        screen: &mut impl Screen,
        keys: &impl Keypad,
        rng: &mut impl RandomByte,
        insn: Insn,
    ) -> Result<()> {
        match insn {
            Insn::Cls                    => self.clear_screen(screen),
            Insn::Ret                    => self.ret()?,
            Insn::Jump       { n }       => self.jump(n),
            Insn::Call       { n }       => self.call(n)?,
            Insn::SkipEqB    { x, k }    => self.skip_equals_immediate(regs, x, k),
            Insn::SkipNeB    { x, k }    => self.skip_not_equals_immediate(regs, x, k),
            Insn::SkipEq     { x, y }    => self.skip_equals(regs, x, y),
            Insn::LoadB      { x, k }    => self.load_immediate(regs, x, k),
            Insn::AddB       { x, k }    => self.add_immediate(regs, x, k),
            Insn::Move       { x, y }    => self.load(regs, x, y),
            Insn::Or         { x, y }    => self.or(regs, x, y),
            Insn::And        { x, y }    => self.and(regs, x, y),
            Insn::Xor        { x, y }    => self.xor(regs, x, y),
            Insn::Add        { x, y }    => self.add(regs, x, y),
            Insn::Sub        { x, y }    => self.sub(regs, x, y),
            Insn::ShiftRight { x, y: _ } => self.shift_right(regs, x),
            Insn::SubFrom    { x, y }    => self.backwards_sub(regs, x, y),
            Insn::ShiftLeft  { x, y: _ } => self.shift_left(regs, x),
            Insn::SkipNe     { x, y }    => self.skip_not_equals(regs, x, y),
            Insn::LoadI      { n }       => self.load_i_immediate(n),
            Insn::JumpV0     { n }       => self.jump_indexed(regs, n),
            Insn::Rand       { x, k }    => self.rand(regs, rng, x, k),
            Insn::Draw       { x, y, n } => self.draw(mem, regs, screen, x, y, n)?,
            Insn::SkipKey    { x }       => self.skip_key_equals(regs, keys, x),
            Insn::SkipNoKey  { x }       => self.skip_key_not_equals(regs, keys, x),
            Insn::GetDelay   { x }       => self.load_delay_timer(regs, x),
            Insn::WaitKey    { x }       => self.wait_for_key(regs, keys, x),
            Insn::SetDelay   { x }       => self.store_delay_timer(regs, x),
            Insn::SetSound   { x }       => self.store_sound_timer(regs, x),
            Insn::AddI       { x }       => self.add_i(regs, x),
            Insn::Font       { x }       => self.load_sprite(regs, x),
            Insn::Bcd        { x }       => self.bcd_convert(mem, regs, x)?,
            Insn::Store      { x }       => self.store_dma(mem, regs, x)?,
            Insn::Load       { x }       => self.load_dma(mem, regs, x)?,
        }
        Ok(())
    }
}

/// |`00E0`| and |`00EE`|, the two full-word opcodes
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`00E0`| Clear screen memory to all 0       |
/// |`00EE`| Return from subroutine             |
impl CPU {
    /// |`00E0`| Clears the screen and marks the display dirty
    pub(super) fn clear_screen(&mut self, screen: &mut impl Screen) {
        screen.clear();
        self.draw = true;
    }
    /// |`00EE`| Returns from subroutine
    pub(super) fn ret(&mut self) -> Result<()> {
        self.pc = self.stack.pop()?;
        Ok(())
    }
}

/// Control flow
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`1nnn`| Jump to nnn                        |
/// |`2nnn`| Push pc, jump to nnn               |
/// |`Bnnn`| Jump to v0 + nnn, masked to 12 bits|
impl CPU {
    /// |`1nnn`| Sets the program counter to an absolute address
    pub(super) fn jump(&mut self, n: Adr) {
        self.pc = n;
    }
    /// |`2nnn`| Pushes pc onto the stack, then jumps to n
    ///
    /// The pushed pc already points past the call, so the matching
    /// `00EE` resumes at the following instruction.
    pub(super) fn call(&mut self, n: Adr) -> Result<()> {
        self.stack.push(self.pc)?;
        self.pc = n;
        Ok(())
    }
    /// |`Bnnn`| Jumps to v0 + nnn, masked into the address space
    pub(super) fn jump_indexed(&mut self, regs: &RegisterFile, n: Adr) {
        self.pc = n.wrapping_add(regs.get(0) as Adr) & 0x0FFF;
    }
}

/// Conditional skips
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`3xkk`| Skip next instruction if vX == kk  |
/// |`4xkk`| Skip next instruction if vX != kk  |
/// |`5xy0`| Skip next instruction if vX == vY  |
/// |`9xy0`| Skip next instruction if vX != vY  |
impl CPU {
    /// |`3xkk`| Skips the next instruction if vX == kk
    pub(super) fn skip_equals_immediate(&mut self, regs: &RegisterFile, x: Reg, k: u8) {
        if regs.get(x) == k {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`4xkk`| Skips the next instruction if vX != kk
    pub(super) fn skip_not_equals_immediate(&mut self, regs: &RegisterFile, x: Reg, k: u8) {
        if regs.get(x) != k {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`5xy0`| Skips the next instruction if vX == vY
    pub(super) fn skip_equals(&mut self, regs: &RegisterFile, x: Reg, y: Reg) {
        if regs.get(x) == regs.get(y) {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`9xy0`| Skips the next instruction if vX != vY
    pub(super) fn skip_not_equals(&mut self, regs: &RegisterFile, x: Reg, y: Reg) {
        if regs.get(x) != regs.get(y) {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// Loads and arithmetic
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`6xkk`| vX = kk                            |
/// |`7xkk`| vX += kk, carry not tracked        |
/// |`8xy0`| vX = vY                            |
/// |`8xy1`| vX |= vY                           |
/// |`8xy2`| vX &= vY                           |
/// |`8xy3`| vX ^= vY                           |
/// |`8xy4`| vX += vY; vF = carry               |
/// |`8xy5`| vX -= vY; vF = !borrow             |
/// |`8xy6`| vF = vX & 1; vX >>= 1              |
/// |`8xy7`| vX = vY - vX; vF = !borrow         |
/// |`8xyE`| vF = vX >> 7; vX <<= 1             |
///
/// The flag register updates are explicit two-output stores, never a
/// side effect buried in a transform. The flag lands before the result
/// does, so when vF itself is the destination the computed value wins.
impl CPU {
    /// |`6xkk`| Loads immediate byte kk into vX
    pub(super) fn load_immediate(&mut self, regs: &mut RegisterFile, x: Reg, k: u8) {
        regs.set(x, k);
    }
    /// |`7xkk`| Adds immediate byte kk to vX. Unlike `8xy4`, the carry
    /// is not recorded anywhere.
    pub(super) fn add_immediate(&mut self, regs: &mut RegisterFile, x: Reg, k: u8) {
        regs.apply(x, |vx| vx.wrapping_add(k));
    }
    /// |`8xy0`| Loads the value of vY into vX
    pub(super) fn load(&mut self, regs: &mut RegisterFile, x: Reg, y: Reg) {
        regs.set(x, regs.get(y));
    }
    /// |`8xy1`| vX = vX | vY
    pub(super) fn or(&mut self, regs: &mut RegisterFile, x: Reg, y: Reg) {
        let vy = regs.get(y);
        regs.apply(x, |vx| vx | vy);
    }
    /// |`8xy2`| vX = vX & vY
    pub(super) fn and(&mut self, regs: &mut RegisterFile, x: Reg, y: Reg) {
        let vy = regs.get(y);
        regs.apply(x, |vx| vx & vy);
    }
    /// |`8xy3`| vX = vX ^ vY
    pub(super) fn xor(&mut self, regs: &mut RegisterFile, x: Reg, y: Reg) {
        let vy = regs.get(y);
        regs.apply(x, |vx| vx ^ vy);
    }
    /// |`8xy4`| vX = vX + vY; vF = 1 on carry out of bit 7
    pub(super) fn add(&mut self, regs: &mut RegisterFile, x: Reg, y: Reg) {
        let (vx, carry) = regs.get(x).overflowing_add(regs.get(y));
        regs.set(FLAG, carry.into());
        regs.set(x, vx);
    }
    /// |`8xy5`| vX = vX - vY; vF = 1 when no borrow was needed
    pub(super) fn sub(&mut self, regs: &mut RegisterFile, x: Reg, y: Reg) {
        let (vx, borrow) = regs.get(x).overflowing_sub(regs.get(y));
        regs.set(FLAG, (!borrow).into());
        regs.set(x, vx);
    }
    /// |`8xy6`| vF = the bit shifted out; vX = vX >> 1
    pub(super) fn shift_right(&mut self, regs: &mut RegisterFile, x: Reg) {
        let vx = regs.get(x);
        regs.set(FLAG, vx & 1);
        regs.set(x, vx >> 1);
    }
    /// |`8xy7`| vX = vY - vX; vF = 1 when no borrow was needed
    pub(super) fn backwards_sub(&mut self, regs: &mut RegisterFile, x: Reg, y: Reg) {
        let (vx, borrow) = regs.get(y).overflowing_sub(regs.get(x));
        regs.set(FLAG, (!borrow).into());
        regs.set(x, vx);
    }
    /// |`8xyE`| vF = the bit shifted out; vX = vX << 1
    pub(super) fn shift_left(&mut self, regs: &mut RegisterFile, x: Reg) {
        let vx = regs.get(x);
        regs.set(FLAG, vx >> 7);
        regs.set(x, vx << 1);
    }
}

/// Index register
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`Annn`| I = nnn                            |
/// |`Fx1E`| I += vX, unmasked                  |
/// |`Fx29`| I = font glyph address of vX       |
impl CPU {
    /// |`Annn`| Loads address nnn into I
    pub(super) fn load_i_immediate(&mut self, n: Adr) {
        self.i = n;
    }
    /// |`Fx1E`| Adds vX to I. The sum is deliberately not masked to the
    /// address space: a careless program may push I past 0xFFF, and the
    /// error surfaces on the next access through I, not here.
    pub(super) fn add_i(&mut self, regs: &RegisterFile, x: Reg) {
        self.i = self.i.wrapping_add(regs.get(x) as Adr);
    }
    /// |`Fx29`| Points I at the 5-byte font glyph for the digit in vX
    pub(super) fn load_sprite(&mut self, regs: &RegisterFile, x: Reg) {
        self.i = self.font + regs.get(x) as Adr * 5;
    }
}

/// |`Cxkk`| Stores a masked random byte into vX
impl CPU {
    /// |`Cxkk`| vX = random byte & kk
    pub(super) fn rand(&mut self, regs: &mut RegisterFile, rng: &mut impl RandomByte, x: Reg, k: u8) {
        regs.set(x, rng.next_byte() & k);
    }
}

/// |`Dxyn`| Draws an n-row sprite to the screen at (vX, vY)
impl CPU {
    /// |`Dxyn`| XOR-blits the sprite at memory[I..I+n] to (vX, vY).
    ///
    /// Rows are 8 pixels, most significant bit leftmost. Both coordinates
    /// wrap per pixel. vF starts at 0 and latches to 1 on the first
    /// collision (a set pixel toggling off); it never resets mid-sprite.
    pub(super) fn draw(
        &mut self,
        mem: &Memory,
        regs: &mut RegisterFile,
        screen: &mut impl Screen,
        x: Reg,
        y: Reg,
        n: Nib,
    ) -> Result<()> {
        let mut sprite = [0; 16];
        let sprite = &mut sprite[..n as usize];
        sprite.copy_from_slice(mem.slice(self.i, n as usize)?);

        let (left, top) = (regs.get(x) as usize, regs.get(y) as usize);
        regs.set(FLAG, 0);
        for (row, &bits) in sprite.iter().enumerate() {
            for col in 0..8 {
                if bits & (0x80 >> col) != 0 {
                    let (px, py) = (left + col, top + row);
                    if screen.get(px, py) {
                        regs.set(FLAG, 1);
                    }
                    screen.toggle(px, py);
                }
            }
        }
        self.draw = true;
        Ok(())
    }
}

/// Keypad queries
///
/// |opcode| effect                                  |
/// |------|-----------------------------------------|
/// |`Ex9E`| Skip next instruction if key vX is down |
/// |`ExA1`| Skip next instruction if key vX is up   |
/// |`Fx0A`| Wait for any key, store it in vX        |
impl CPU {
    /// |`Ex9E`| Skips the next instruction if key vX is pressed
    pub(super) fn skip_key_equals(&mut self, regs: &RegisterFile, keys: &impl Keypad, x: Reg) {
        if keys.is_pressed(regs.get(x) as usize) {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`ExA1`| Skips the next instruction if key vX is not pressed
    pub(super) fn skip_key_not_equals(&mut self, regs: &RegisterFile, keys: &impl Keypad, x: Reg) {
        if !keys.is_pressed(regs.get(x) as usize) {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`Fx0A`| Stores the lowest pressed key in vX, or re-arms itself.
    ///
    /// "Blocking" is cooperative: with no key down, the pc rewinds over
    /// this instruction so the next step fetches it again, leaving the
    /// host loop free to service input and timers in between.
    pub(super) fn wait_for_key(&mut self, regs: &mut RegisterFile, keys: &impl Keypad, x: Reg) {
        match keys.first_pressed() {
            Some(key) => regs.set(x, key),
            None => self.pc = self.pc.wrapping_sub(2),
        }
    }
}

/// Timers and memory transfer
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`Fx07`| vX = delay timer                   |
/// |`Fx15`| delay timer = vX                   |
/// |`Fx18`| sound timer = vX                   |
/// |`Fx33`| memory[I..I+3] = digits of vX      |
/// |`Fx55`| memory[I..=I+x] = v0..=vX          |
/// |`Fx65`| v0..=vX = memory[I..=I+x]          |
impl CPU {
    /// |`Fx07`| vX = DT
    pub(super) fn load_delay_timer(&mut self, regs: &mut RegisterFile, x: Reg) {
        regs.set(x, self.delay);
    }
    /// |`Fx15`| DT = vX
    pub(super) fn store_delay_timer(&mut self, regs: &RegisterFile, x: Reg) {
        self.delay = regs.get(x);
    }
    /// |`Fx18`| ST = vX
    pub(super) fn store_sound_timer(&mut self, regs: &RegisterFile, x: Reg) {
        self.sound = regs.get(x);
    }
    /// |`Fx33`| Stores the decimal digits of vX at I, I+1, I+2
    pub(super) fn bcd_convert(&mut self, mem: &mut Memory, regs: &RegisterFile, x: Reg) -> Result<()> {
        let vx = regs.get(x);
        let digits = mem.slice_mut(self.i, 3)?;
        digits[0] = vx / 100;
        digits[1] = vx / 10 % 10;
        digits[2] = vx % 10;
        Ok(())
    }
    /// |`Fx55`| Stores v0..=vX at memory[I..]. I is left unchanged.
    pub(super) fn store_dma(&mut self, mem: &mut Memory, regs: &RegisterFile, x: Reg) -> Result<()> {
        mem.slice_mut(self.i, x + 1)?
            .copy_from_slice(&regs.as_slice()[..=x]);
        Ok(())
    }
    /// |`Fx65`| Loads memory[I..] into v0..=vX. I is left unchanged.
    pub(super) fn load_dma(&mut self, mem: &Memory, regs: &mut RegisterFile, x: Reg) -> Result<()> {
        for (reg, &value) in mem.slice(self.i, x + 1)?.iter().enumerate() {
            regs.set(reg, value);
        }
        Ok(())
    }
}
