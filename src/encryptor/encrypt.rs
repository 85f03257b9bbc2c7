//! src/encryptor/encrypt.rs
//! One-call encryption over a reader, or over an in-memory buffer

use crate::aliases::{Aes256Key32, Iv16};
use crate::consts::{BLOCK_SIZE, DEFAULT_BUFFER_SIZE};
use crate::encryptor::chain::BlockCipherChain;
use crate::encryptor::length::encrypted_length;
use crate::encryptor::pump::{pump, PumpReport};
use crate::encryptor::sink::ByteSink;
use crate::error::CodecError;
use std::io::{Cursor, Read};

/// Encrypt `input` into `output` as `IV || ciphertext || tag`.
///
/// Uses a fresh session and the default 1 MiB staging buffer. `output` is
/// closed on return, successful or not.
///
/// # Thread Safety
///
/// Each call owns its session; concurrent calls on different streams are
/// independent. A single stream is always encrypted sequentially.
///
/// # Example
///
/// ```
/// use cbc_hmac_stream::aliases::{Aes256Key32, Iv16};
/// use cbc_hmac_stream::{encrypt, encrypted_length};
/// use std::io::Cursor;
///
/// let iv = Iv16::new([0u8; 16]);
/// let mac_key = Aes256Key32::new([1u8; 32]);
/// let cipher_key = Aes256Key32::new([2u8; 32]);
///
/// let mut encrypted = Vec::new();
/// encrypt(Cursor::new(b"hello"), &mut encrypted, &iv, &mac_key, &cipher_key).unwrap();
/// assert_eq!(encrypted.len() as u64, encrypted_length(5).unwrap());
/// ```
#[inline]
pub fn encrypt<R, S>(
    input: R,
    output: &mut S,
    iv: &Iv16,
    mac_key: &Aes256Key32,
    cipher_key: &Aes256Key32,
) -> Result<PumpReport, CodecError>
where
    R: Read,
    S: ByteSink + ?Sized,
{
    let chain = BlockCipherChain::from_keys(iv, mac_key, cipher_key)?;
    pump(chain, input, output, DEFAULT_BUFFER_SIZE)
}

/// Encrypt an in-memory plaintext into a buffer pre-sized with
/// [`encrypted_length`].
///
/// # Errors
///
/// [`CodecError::LengthOverflow`] for absurd lengths, and
/// [`CodecError::Integrity`] if the output does not match the length law.
pub fn encrypt_to_vec(
    plaintext: &[u8],
    iv: &Iv16,
    mac_key: &Aes256Key32,
    cipher_key: &Aes256Key32,
) -> Result<Vec<u8>, CodecError> {
    let expected = encrypted_length(plaintext.len() as u64)?;
    let capacity = usize::try_from(expected)
        .map_err(|_| CodecError::LengthOverflow(plaintext.len() as u64))?;

    let mut output = Vec::with_capacity(capacity);
    let buffer_size = DEFAULT_BUFFER_SIZE.min(aligned_up(plaintext.len()));
    let chain = BlockCipherChain::from_keys(iv, mac_key, cipher_key)?;
    pump(chain, Cursor::new(plaintext), &mut output, buffer_size)?;

    if output.len() as u64 != expected {
        return Err(CodecError::Integrity(format!(
            "encrypted {} bytes, expected {expected}",
            output.len()
        )));
    }
    Ok(output)
}

/// Smallest non-zero multiple of 16 holding `len` bytes.
#[inline(always)]
fn aligned_up(len: usize) -> usize {
    len.div_ceil(BLOCK_SIZE).max(1) * BLOCK_SIZE
}
