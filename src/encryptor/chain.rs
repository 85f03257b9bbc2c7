//! src/encryptor/chain.rs
//! Streaming CBC built from one-shot padded encryptions
//!
//! Each non-final buffer is encrypted with the one-shot primitive, which
//! always appends a padding block. That block is dropped: CBC ciphertext for a
//! prefix never depends on what follows it, so the retained bytes are exactly
//! the stream's ciphertext and their last block is the next chaining value.
//! The final call keeps its padding and is followed by the HMAC tag.

use crate::aliases::{Aes256Key32, Block16, HmacSha256, Iv16};
use crate::consts::{BLOCK_SIZE, IV_LENGTH, KEY_LENGTH};
use crate::crypto::oneshot::{Aes256CbcOneShot, OneShotCbc};
use crate::error::CodecError;
use crate::utils::{is_block_aligned, padded_len};
use hmac::Mac;
use std::io::Write;
use tracing::trace;

/// Position of a session in its linear call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    /// Created; only `emit_iv` is allowed.
    Unstarted,
    /// IV written; `encrypt_aligned` or `finish` are allowed.
    Active,
    /// Tag written; the session is spent.
    Finished,
    /// An operation failed part-way; the session is spent.
    Failed,
}

/// One encryption session: key schedule, chaining value and running HMAC.
///
/// Call order is `emit_iv`, any number of `encrypt_aligned`, then exactly one
/// `finish`. Out-of-order calls fail with [`CodecError::InvalidState`], and
/// any error leaves the session in [`ChainState::Failed`].
pub struct BlockCipherChain<P = Aes256CbcOneShot> {
    primitive: P,
    iv: Iv16,
    chaining_value: Block16,
    hmac: HmacSha256,
    state: ChainState,
    bytes_emitted: u64,
}

impl BlockCipherChain<Aes256CbcOneShot> {
    /// Create a session from raw IV, MAC key and cipher key bytes.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidParameter`] if the IV is not 16 bytes or either
    /// key is not 32 bytes.
    pub fn new(iv: &[u8], mac_key: &[u8], cipher_key: &[u8]) -> Result<Self, CodecError> {
        let cipher_key = to_key(cipher_key, "cipher key")?;
        let primitive = Aes256CbcOneShot::new(&cipher_key);
        Self::with_primitive(iv, mac_key, primitive)
    }

    /// Same as [`new`](Self::new) for callers already holding secure buffers.
    pub fn from_keys(
        iv: &Iv16,
        mac_key: &Aes256Key32,
        cipher_key: &Aes256Key32,
    ) -> Result<Self, CodecError> {
        Self::with_primitive(
            iv.expose_secret(),
            mac_key.expose_secret(),
            Aes256CbcOneShot::new(cipher_key),
        )
    }
}

impl<P: OneShotCbc> BlockCipherChain<P> {
    /// Create a session around an arbitrary one-shot primitive.
    pub fn with_primitive(iv: &[u8], mac_key: &[u8], primitive: P) -> Result<Self, CodecError> {
        let iv: [u8; IV_LENGTH] = iv
            .try_into()
            .map_err(|_| invalid_length("IV", IV_LENGTH, iv.len()))?;
        let mac_key = to_key(mac_key, "MAC key")?;

        let hmac = <HmacSha256 as Mac>::new_from_slice(mac_key.expose_secret())
            .map_err(|e| CodecError::InvalidParameter(e.to_string()))?;

        Ok(Self {
            primitive,
            iv: Iv16::new(iv),
            chaining_value: Block16::new(iv),
            hmac,
            state: ChainState::Unstarted,
            bytes_emitted: 0,
        })
    }

    #[inline]
    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Total bytes written to sinks by this session so far.
    #[inline]
    pub fn bytes_emitted(&self) -> u64 {
        self.bytes_emitted
    }

    /// Write the IV verbatim and feed it into the HMAC. Must be the first call.
    pub fn emit_iv<W>(&mut self, sink: &mut W) -> Result<(), CodecError>
    where
        W: Write + ?Sized,
    {
        self.expect_state(ChainState::Unstarted, "emit IV")?;
        self.state = ChainState::Failed;

        sink.write_all(self.iv.expose_secret())?;
        self.hmac.update(self.iv.expose_secret());
        self.bytes_emitted += IV_LENGTH as u64;

        self.state = ChainState::Active;
        Ok(())
    }

    /// Encrypt one block-aligned, non-final buffer.
    ///
    /// # Errors
    ///
    /// - [`CodecError::Alignment`] if `plaintext.len()` is not a multiple of 16
    /// - [`CodecError::Integrity`] if the primitive returns anything but
    ///   `plaintext.len() + 16` bytes
    pub fn encrypt_aligned<W>(&mut self, sink: &mut W, plaintext: &[u8]) -> Result<(), CodecError>
    where
        W: Write + ?Sized,
    {
        self.expect_state(ChainState::Active, "encrypt aligned buffer")?;
        self.state = ChainState::Failed;

        if !is_block_aligned(plaintext.len()) {
            return Err(CodecError::alignment(plaintext.len()));
        }

        let mut raw = self
            .primitive
            .encrypt_padded(self.chaining_value.expose_secret(), plaintext);
        if raw.len() != plaintext.len() + BLOCK_SIZE {
            return Err(CodecError::Integrity(format!(
                "one-shot primitive returned {} bytes for {} aligned bytes",
                raw.len(),
                plaintext.len()
            )));
        }

        // drop the manufactured padding block
        raw.truncate(plaintext.len());

        sink.write_all(&raw)?;
        self.hmac.update(&raw);
        self.bytes_emitted += raw.len() as u64;

        if let Some(start) = raw.len().checked_sub(BLOCK_SIZE) {
            let next = self.chaining_value.expose_secret_mut();
            next.copy_from_slice(&raw[start..]);
        }

        trace!(len = plaintext.len(), "encrypted aligned buffer");
        self.state = ChainState::Active;
        Ok(())
    }

    /// Encrypt the final (possibly empty, unaligned) tail with padding and
    /// write the HMAC tag. Must be the last call.
    pub fn finish<W>(&mut self, sink: &mut W, tail: &[u8]) -> Result<(), CodecError>
    where
        W: Write + ?Sized,
    {
        self.expect_state(ChainState::Active, "finish")?;
        self.state = ChainState::Failed;

        let raw = self
            .primitive
            .encrypt_padded(self.chaining_value.expose_secret(), tail);
        if raw.len() != padded_len(tail.len()) {
            return Err(CodecError::Integrity(format!(
                "one-shot primitive returned {} bytes for a {}-byte final block",
                raw.len(),
                tail.len()
            )));
        }

        sink.write_all(&raw)?;
        self.hmac.update(&raw);
        self.bytes_emitted += raw.len() as u64;

        let tag = self.hmac.clone().finalize().into_bytes();
        sink.write_all(tag.as_slice())?;
        self.bytes_emitted += tag.len() as u64;

        trace!(
            tail = tail.len(),
            total = self.bytes_emitted,
            "finished stream"
        );
        self.state = ChainState::Finished;
        Ok(())
    }

    #[inline(always)]
    fn expect_state(&self, expected: ChainState, op: &'static str) -> Result<(), CodecError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CodecError::InvalidState {
                op,
                state: self.state,
            })
        }
    }
}

fn to_key(bytes: &[u8], what: &str) -> Result<Aes256Key32, CodecError> {
    let key: [u8; KEY_LENGTH] = bytes
        .try_into()
        .map_err(|_| invalid_length(what, KEY_LENGTH, bytes.len()))?;
    Ok(Aes256Key32::new(key))
}

fn invalid_length(what: &str, expected: usize, got: usize) -> CodecError {
    CodecError::InvalidParameter(format!("{what} must be {expected} bytes, got {got}"))
}
