//! Return-address stack for subroutine call and return
//!
//! The reference hardware capped nesting at 16 levels; the interpreter
//! this one was modeled on grew its stack without bound. Both behaviors
//! are available: [CallStack::unbounded] is the default, and
//! [CallStack::bounded] enforces a depth limit with a hard error.

use crate::error::{Error, Result};

/// Saved program counters, pushed by `2nnn` and popped by `00EE`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallStack {
    frames: Vec<u16>,
    limit: Option<usize>,
}

impl CallStack {
    /// A stack that grows as deep as the host allows.
    pub fn unbounded() -> Self {
        CallStack::default()
    }

    /// A stack that fails with [Error::StackOverflow] past `limit` frames.
    ///
    /// # Examples
    /// ```rust
    /// # use cricket::stack::CallStack;
    /// let mut stack = CallStack::bounded(16);
    /// for _ in 0..16 {
    ///     stack.push(0x200).unwrap();
    /// }
    /// assert!(stack.push(0x200).is_err());
    /// ```
    pub fn bounded(limit: usize) -> Self {
        CallStack {
            frames: Vec::with_capacity(limit),
            limit: Some(limit),
        }
    }

    /// Saves a return address.
    pub fn push(&mut self, ret: u16) -> Result<()> {
        if let Some(depth) = self.limit {
            if self.frames.len() >= depth {
                return Err(Error::StackOverflow { depth });
            }
        }
        self.frames.push(ret);
        Ok(())
    }

    /// Takes back the most recently saved return address. An empty stack
    /// is a program bug, reported as [Error::StackUnderflow] rather than
    /// ignored.
    pub fn pop(&mut self) -> Result<u16> {
        self.frames.pop().ok_or(Error::StackUnderflow)
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Drops every frame.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_is_lifo() {
        let mut stack = CallStack::unbounded();
        stack.push(0x202).unwrap();
        stack.push(0x2FE).unwrap();
        assert_eq!(2, stack.depth());
        assert_eq!(0x2FE, stack.pop().unwrap());
        assert_eq!(0x202, stack.pop().unwrap());
    }

    #[test]
    fn pop_of_empty_stack_underflows() {
        let mut stack = CallStack::unbounded();
        assert!(matches!(stack.pop(), Err(Error::StackUnderflow)));
    }

    #[test]
    fn bounded_stack_overflows_at_limit() {
        let mut stack = CallStack::bounded(2);
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert!(matches!(
            stack.push(3),
            Err(Error::StackOverflow { depth: 2 })
        ));
        // the failed push left the stack usable
        assert_eq!(2, stack.pop().unwrap());
    }

    #[test]
    fn unbounded_stack_grows_past_16() {
        let mut stack = CallStack::unbounded();
        for frame in 0..64 {
            stack.push(frame).unwrap();
        }
        assert_eq!(64, stack.depth());
    }
}
