//! src/builders/encryptor_builder.rs
//! Stream encryptor builder: keys in secure buffers, sensible defaults

use crate::aliases::{Aes256Key32, Iv16};
use crate::consts::DEFAULT_BUFFER_SIZE;
use crate::encryptor::{encrypted_length, pump, BlockCipherChain, ByteSink, PumpReport};
use crate::error::CodecError;
use std::io::Read;

/// Configures and runs one stream encryption.
///
/// Defaults: a random IV (feature `rand`) and a 1 MiB staging buffer
/// ([`DEFAULT_BUFFER_SIZE`]).
///
/// # Thread Safety
///
/// The builder is `Send + Sync`. Each [`encrypt`](Self::encrypt) call consumes
/// it, so one builder drives exactly one session.
#[derive(Debug)]
pub struct EncryptorBuilder {
    mac_key: Aes256Key32,
    cipher_key: Aes256Key32,
    iv: Iv16,
    buffer_size: usize,
}

impl EncryptorBuilder {
    /// Create a builder with a fresh random IV.
    ///
    /// # Errors
    ///
    /// [`CodecError::Io`] if the OS RNG fails.
    #[cfg(feature = "rand")]
    pub fn new(mac_key: Aes256Key32, cipher_key: Aes256Key32) -> Result<Self, CodecError> {
        use crate::crypto::rng::SecureRandomExt;
        Ok(Self::with_fixed_iv(mac_key, cipher_key, Iv16::random()?))
    }

    /// Create a builder with a caller-supplied IV.
    #[must_use]
    pub fn with_fixed_iv(mac_key: Aes256Key32, cipher_key: Aes256Key32, iv: Iv16) -> Self {
        Self {
            mac_key,
            cipher_key,
            iv,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Replace the IV.
    #[must_use]
    pub fn with_iv(mut self, iv: impl Into<[u8; 16]>) -> Self {
        self.iv = Iv16::new(iv.into());
        self
    }

    /// Set the staging buffer size. Checked when encrypting: it must be a
    /// non-zero multiple of 16.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// The IV that will prefix the stream (public, needed by the reader).
    #[must_use]
    pub fn iv(&self) -> &[u8; 16] {
        self.iv.expose_secret()
    }

    #[must_use]
    pub const fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Size of the encrypted form of `plaintext_len` bytes.
    #[inline]
    pub fn encrypted_length(&self, plaintext_len: u64) -> Result<u64, CodecError> {
        encrypted_length(plaintext_len)
    }

    /// Build the session without running it.
    pub fn build_chain(&self) -> Result<BlockCipherChain, CodecError> {
        BlockCipherChain::from_keys(&self.iv, &self.mac_key, &self.cipher_key)
    }

    /// Encrypt `input` into `output`, closing `output` on return.
    pub fn encrypt<R, S>(self, input: R, output: &mut S) -> Result<PumpReport, CodecError>
    where
        R: Read,
        S: ByteSink + ?Sized,
    {
        let chain = self.build_chain()?;
        pump(chain, input, output, self.buffer_size)
    }

    /// Async variant of [`encrypt`](Self::encrypt); shuts `output` down on return.
    #[cfg(feature = "tokio")]
    pub async fn encrypt_async<R, W>(
        self,
        input: &mut R,
        output: &mut W,
    ) -> Result<PumpReport, CodecError>
    where
        R: tokio::io::AsyncRead + Unpin + ?Sized,
        W: tokio::io::AsyncWrite + Unpin + ?Sized,
    {
        let chain = self.build_chain()?;
        crate::encryptor::pump_async(chain, input, output, self.buffer_size).await
    }
}
