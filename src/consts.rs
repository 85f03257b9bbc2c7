//! # Constants
//!
//! Sizes of the wire format and the limits the codec enforces.

/// AES block size in bytes. Every intermediate buffer is a multiple of this.
pub const BLOCK_SIZE: usize = 16;

/// Length of the IV written at the start of every stream.
pub const IV_LENGTH: usize = 16;

/// Length of the AES-256 cipher key and of the HMAC key.
pub const KEY_LENGTH: usize = 32;

/// Length of the HMAC-SHA256 tag written at the end of every stream.
pub const TAG_LENGTH: usize = 32;

/// Default staging buffer size for the pump (1 MiB).
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Largest integer that survives a round trip through an IEEE-754 double.
///
/// Encrypted lengths are advertised to object stores as JSON numbers, so the
/// length law is kept inside this range.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Largest plaintext length accepted by [`encrypted_length`](crate::encrypted_length).
///
/// The encrypted form adds at most 64 bytes (IV, one padding block, tag).
pub const MAX_PLAINTEXT_LENGTH: u64 = MAX_SAFE_INTEGER - 64;

/// Smallest possible output: IV, one padding block, tag.
pub const MIN_ENCRYPTED_LENGTH: u64 = (IV_LENGTH + BLOCK_SIZE + TAG_LENGTH) as u64;
