// src/crypto/rng.rs
//! Secure randomness for fixed-size secrets
//!
//! Adds `T::random()` to every `SpanBuffer` alias (`Iv16`, `Aes256Key32`, …)
//! backed by the operating system RNG.

use crate::error::CodecError;
use rand::rngs::OsRng;
use rand::TryRngCore;
use secure_gate::Fixed;

/// Extension trait – gives `.random()` to all fixed-size secret types
pub trait SecureRandomExt: Sized {
    /// Generate a cryptographically secure random instance of this type.
    ///
    /// Fails with [`CodecError::Io`] if the OS RNG is unavailable.
    fn random() -> Result<Self, CodecError>;
}

impl<const N: usize> SecureRandomExt for Fixed<[u8; N]> {
    #[inline]
    fn random() -> Result<Self, CodecError> {
        let mut secret = Fixed::new([0u8; N]);
        OsRng
            .try_fill_bytes(secret.expose_secret_mut())
            .map_err(|e| CodecError::Io(std::io::Error::other(e)))?;
        Ok(secret)
    }
}
