//! # Builders
//!
//! Builder patterns for configuring encryption runs.
//!
//! ## Modules
//!
//! - [`encryptor_builder`] - keys, IV and staging buffer size for one stream

pub mod encryptor_builder;

pub use encryptor_builder::EncryptorBuilder;
