//! The pixel-grid port and the bundled 64x32 framebuffer
//!
//! The core only ever XOR-toggles, reads back, and clears pixels; how the
//! grid reaches glass is the host's problem. Coordinates wrap modulo the
//! grid size on both axes, so sprite drawing never clips.

use std::fmt::{Display, Formatter};

/// Width of the standard display in pixels
pub const WIDTH: usize = 64;
/// Height of the standard display in pixels
pub const HEIGHT: usize = 32;

/// Capability contract for a monochrome XOR display.
pub trait Screen {
    /// Horizontal pixel count
    fn width(&self) -> usize;
    /// Vertical pixel count
    fn height(&self) -> usize;
    /// Sets every pixel to 0
    fn clear(&mut self);
    /// XOR-toggles the pixel at (x, y), wrapping both coordinates
    fn toggle(&mut self, x: usize, y: usize);
    /// Reads the pixel at (x, y), wrapping both coordinates
    fn get(&self, x: usize, y: usize) -> bool;
}

/// In-memory [Screen] implementation.
///
/// # Examples
/// ```rust
/// # use cricket::prelude::*;
/// let mut fb = Framebuffer::default();
/// fb.toggle(3, 4);
/// assert!(fb.get(3, 4));
/// // wraps on both axes
/// assert!(fb.get(3 + 64, 4 + 32));
/// fb.toggle(3, 4);
/// assert!(!fb.get(3, 4));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Framebuffer {
    /// A zeroed grid of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        (y % self.height) * self.width + (x % self.width)
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Framebuffer::new(WIDTH, HEIGHT)
    }
}

impl Screen for Framebuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self) {
        self.pixels.fill(false);
    }

    fn toggle(&mut self, x: usize, y: usize) {
        let index = self.index(x, y);
        self.pixels[index] ^= true;
    }

    fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[self.index(x, y)]
    }
}

impl Display for Framebuffer {
    /// Renders the grid at 1bpp using block characters.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", if self.get(x, y) { '█' } else { ' ' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
