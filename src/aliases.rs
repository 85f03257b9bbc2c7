//! # Secure-Gate Type Aliases
//!
//! Fixed-size secret wrappers used throughout the codec. All of them are
//! [`secure_gate::Fixed`] buffers and are zeroized on drop.
//!
//! ## Type Categories
//!
//! ### HMAC Primitive
//! - [`HmacSha256`] - running tag over `IV || ciphertext`
//!
//! ### Generic Secure Buffers
//! - [`SpanBuffer<N>`] - secure stack buffer for any size `N`
//! - [`StagingBuffer`] - heap buffer holding plaintext awaiting a flush
//!
//! ### Semantic Fixed-Size Types
//! - [`Block16`] - one AES block (chaining value, scratch block)
//! - [`Iv16`] - 16-byte initialization vector
//! - [`Aes256Key32`] - 32-byte AES-256 key or HMAC key
//!
//! All secure types require an explicit `.expose_secret()` or
//! `.expose_secret_mut()` to reach the bytes.

use hmac::Hmac;
use sha2::Sha256;

pub type HmacSha256 = Hmac<Sha256>;

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic secure stack buffer
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

pub type Block16 = SpanBuffer<16>; // one AES block
pub type Iv16 = SpanBuffer<16>; // stream IV, emitted verbatim
pub type Aes256Key32 = SpanBuffer<32>; // cipher key, HMAC key

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type StagingBuffer = secure_gate::Dynamic<Vec<u8>>;
