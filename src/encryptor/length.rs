//! Output-length law used by callers to pre-size destinations.

use crate::consts::{BLOCK_SIZE, IV_LENGTH, MAX_PLAINTEXT_LENGTH, TAG_LENGTH};
use crate::error::CodecError;

/// Exact encrypted size of a `plaintext_len`-byte stream:
/// `16 + 16 * ceil((L + 1) / 16) + 32`.
///
/// Independent of how the plaintext is chunked and of the pump's buffer size.
///
/// # Errors
///
/// [`CodecError::LengthOverflow`] if `plaintext_len` exceeds
/// [`MAX_PLAINTEXT_LENGTH`].
#[inline]
pub fn encrypted_length(plaintext_len: u64) -> Result<u64, CodecError> {
    if plaintext_len > MAX_PLAINTEXT_LENGTH {
        return Err(CodecError::LengthOverflow(plaintext_len));
    }
    let block = BLOCK_SIZE as u64;
    let ciphertext = (plaintext_len / block + 1) * block;
    Ok(IV_LENGTH as u64 + ciphertext + TAG_LENGTH as u64)
}
