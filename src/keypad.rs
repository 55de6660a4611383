//! The 16-key hex keypad port
//!
//! The core only asks two questions: "is key k down right now?" and
//! "which keys are down?". Edge timing, key repeat, and host keyboard
//! mapping are all collaborator concerns.

use crate::error::{Error, Result};

/// Capability contract for the keypad a program polls.
pub trait Keypad {
    /// Whether key `key` (0..=0xF) is currently held.
    fn is_pressed(&self, key: usize) -> bool;

    /// Snapshot of all sixteen key states, index = key.
    fn keys(&self) -> [bool; 16];

    /// Lowest-numbered held key, if any. This is the scan order the
    /// `Fx0A` wait-for-key instruction relies on.
    fn first_pressed(&self) -> Option<u8> {
        self.keys().iter().position(|&held| held).map(|key| key as u8)
    }
}

/// Bundled [Keypad] implementation driven by press/release calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keys {
    held: [bool; 16],
}

impl Keys {
    /// Presses a key, and reports whether the key's state changed.
    /// If the key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use cricket::prelude::*;
    /// let mut keys = Keys::default();
    /// assert!(keys.press(0x7).unwrap());
    /// // already held, so nothing changed
    /// assert!(!keys.press(0x7).unwrap());
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        match self.held.get_mut(key) {
            Some(held) if !*held => {
                *held = true;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(Error::InvalidKey { key }),
        }
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If the key does not exist, returns [Error::InvalidKey].
    pub fn release(&mut self, key: usize) -> Result<bool> {
        match self.held.get_mut(key) {
            Some(held) if *held => {
                *held = false;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(Error::InvalidKey { key }),
        }
    }
}

impl Keypad for Keys {
    fn is_pressed(&self, key: usize) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    fn keys(&self) -> [bool; 16] {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_report_changes() {
        let mut keys = Keys::default();
        assert!(keys.press(0xA).unwrap());
        assert!(!keys.press(0xA).unwrap());
        assert!(keys.is_pressed(0xA));
        assert!(keys.release(0xA).unwrap());
        assert!(!keys.release(0xA).unwrap());
        assert!(!keys.is_pressed(0xA));
    }

    #[test]
    fn key_out_of_range_is_an_error() {
        let mut keys = Keys::default();
        assert!(matches!(keys.press(16), Err(Error::InvalidKey { key: 16 })));
        assert!(matches!(keys.release(16), Err(Error::InvalidKey { key: 16 })));
    }

    #[test]
    fn first_pressed_scans_low_to_high() {
        let mut keys = Keys::default();
        assert_eq!(None, keys.first_pressed());
        keys.press(0xC).unwrap();
        keys.press(0x3).unwrap();
        assert_eq!(Some(0x3), keys.first_pressed());
    }
}
