//! Injected randomness for the `Cxkk` instruction
//!
//! The core never owns an entropy source. Callers hand one in per step,
//! which keeps replays deterministic under test: any [rand::RngCore]
//! qualifies, so production uses [rand::rngs::ThreadRng] and tests use
//! [rand::rngs::mock::StepRng].

/// Capability contract for the `Cxkk` random byte.
pub trait RandomByte {
    /// The next uniformly distributed byte.
    fn next_byte(&mut self) -> u8;
}

impl<T: rand::RngCore> RandomByte for T {
    fn next_byte(&mut self) -> u8 {
        (self.next_u32() & 0xFF) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn step_rng_is_deterministic() {
        let mut rng = StepRng::new(5, 1);
        assert_eq!(5, rng.next_byte());
        assert_eq!(6, rng.next_byte());
        assert_eq!(7, rng.next_byte());
    }

    #[test]
    fn bytes_truncate_to_eight_bits() {
        let mut rng = StepRng::new(0x1FF, 0);
        assert_eq!(0xFF, rng.next_byte());
    }
}
