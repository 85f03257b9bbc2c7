//! # Error Types
//!
//! All operations return [`Result<T, CodecError>`](CodecError). None of these
//! errors are retried internally; a session that produced one is spent and the
//! destination it was writing to must be discarded.

use crate::encryptor::ChainState;
use thiserror::Error;

/// The error type for all codec operations.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Reading the source or writing/closing the sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed IV or key length, or an unusable buffer size.
    ///
    /// Callers are expected to validate these before starting a session.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A buffer that must be a whole number of blocks was not.
    ///
    /// This is a contract violation by the caller, not a data error.
    #[error("buffer of {len} bytes is not a multiple of the {block}-byte block size")]
    Alignment { len: usize, block: usize },

    /// The one-shot primitive returned an unexpected number of bytes.
    ///
    /// Signals a primitive mismatch and is never recoverable.
    #[error("integrity error: {0}")]
    Integrity(String),

    /// The declared plaintext length cannot be encoded safely.
    #[error("plaintext length {0} exceeds the maximum encodable length")]
    LengthOverflow(u64),

    /// A session operation was called out of order.
    #[error("cannot {op} in state {state:?}")]
    InvalidState { op: &'static str, state: ChainState },
}

impl CodecError {
    pub(crate) fn alignment(len: usize) -> Self {
        CodecError::Alignment {
            len,
            block: crate::consts::BLOCK_SIZE,
        }
    }
}
