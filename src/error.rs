//! Error type for cricket
//!
//! Everything here is a local, recoverable condition reported by the
//! operation that detected it. The core never takes down the host.

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for cricket.
#[derive(Debug, Error)]
pub enum Error {
    /// A memory access fell outside the 4 KB address space.
    ///
    /// Raised at the point of access, never preemptively: the index
    /// register is allowed to wander past 0xFFF until it's dereferenced.
    #[error("address {addr:04x} is outside addressable memory")]
    AddressOutOfRange {
        /// The offending address
        addr: u16,
    },
    /// A `00EE` return was executed with an empty call stack
    #[error("return with an empty call stack")]
    StackUnderflow,
    /// A `2nnn` call exceeded the configured call stack depth
    #[error("call stack exceeded its configured depth of {depth}")]
    StackOverflow {
        /// The configured depth limit
        depth: usize,
    },
    /// The program image does not fit between 0x200 and the end of memory
    #[error("program of {len} bytes exceeds the {max} bytes available at 0x200")]
    ProgramTooLarge {
        /// Size of the rejected image
        len: usize,
        /// Bytes available for program memory
        max: usize,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
