// src/crypto/mod.rs

//! Low-level crypto primitives.
//!
//! - [`oneshot`]: the whole-buffer padded AES-256-CBC primitive the chain drives.
//! - `rng`: OS randomness for IVs and keys (feature `rand`).
//!
//! HMAC types are defined in `aliases.rs`.

pub mod oneshot;
#[cfg(feature = "rand")]
pub mod rng;

pub use oneshot::{Aes256CbcOneShot, OneShotCbc};
#[cfg(feature = "rand")]
pub use rng::SecureRandomExt;
