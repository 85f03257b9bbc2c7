// src/lib.rs

//! Streaming `IV || AES-256-CBC(plaintext) || HMAC-SHA256(IV || ciphertext)`
//! encryption with bounded memory, built by chaining one-shot padded CBC calls.

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod builders;
pub mod consts;
pub mod crypto;
pub mod encryptor;
pub mod error;
pub mod utils;

// High-level API
pub use encryptor::{encrypt, encrypt_to_vec, encrypted_length};
pub use error::CodecError;

// Session and pump, for callers driving their own sources and sinks
pub use encryptor::{pump, pump_chunks, BlockCipherChain, ByteSink, ChainState, PumpReport};
#[cfg(feature = "tokio")]
pub use encryptor::pump_async;

pub use builders::EncryptorBuilder;
pub use crypto::{Aes256CbcOneShot, OneShotCbc};
#[cfg(feature = "rand")]
pub use crypto::SecureRandomExt;

#[cfg(feature = "batch-ops")]
pub use batch_ops::encrypt_batch;
