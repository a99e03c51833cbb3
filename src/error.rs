use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitsetError {
    /// A required handle or output slot was absent. Only produced at the C boundary.
    #[error("invalid argument: {0} is null")]
    InvalidArgument(&'static str),

    #[error("bit {bit} is out of range for a bitset of length {len}")]
    OutOfRange { bit: usize, len: usize },

    #[error("failed to allocate storage for {bits} bits")]
    Allocation {
        bits: usize,
        #[source]
        source: TryReserveError,
    },
}
