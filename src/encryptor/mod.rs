// src/encryptor/mod.rs

//! Streaming encryption.
//!
//! Core API: `encrypt(input, &mut output, &iv, &mac_key, &cipher_key)?`.
//! Building blocks: [`BlockCipherChain`] for the session, [`pump`] /
//! [`pump_chunks`] (and `pump_async` with the `tokio` feature) to drive it.

#[cfg(feature = "tokio")]
pub(crate) mod async_pump;
pub(crate) mod chain;
pub(crate) mod encrypt;
pub(crate) mod length;
pub(crate) mod pump;
pub(crate) mod sink;

#[cfg(feature = "tokio")]
pub use async_pump::pump_async;
pub use chain::{BlockCipherChain, ChainState};
pub use encrypt::{encrypt, encrypt_to_vec};
pub use length::encrypted_length;
pub use pump::{pump, pump_chunks, PumpReport};
pub use sink::ByteSink;
