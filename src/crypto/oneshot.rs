//! src/crypto/oneshot.rs
//! Whole-buffer AES-256-CBC with mandatory PKCS#7 padding
//!
//! This is the only primitive the chain is allowed to call. It cannot continue
//! a partial block across calls and it always pads, so an aligned input comes
//! back one full block longer. The chain relies on that extra block.

use crate::aliases::{Aes256Key32, Block16};
use crate::consts::BLOCK_SIZE;
use crate::utils::{padded_len, xor_blocks};
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes256Enc, Block as AesBlock};
use std::fmt;

/// A one-shot padded CBC encryptor.
///
/// Implementations must return `padded_len(plaintext.len())` bytes: the CBC
/// encryption of `plaintext || pkcs7_padding` under `iv`.
pub trait OneShotCbc {
    /// Encrypt `plaintext` in CBC mode starting from `iv`, always padding.
    fn encrypt_padded(&self, iv: &[u8; BLOCK_SIZE], plaintext: &[u8]) -> Vec<u8>;
}

impl<P: OneShotCbc + ?Sized> OneShotCbc for &P {
    #[inline(always)]
    fn encrypt_padded(&self, iv: &[u8; BLOCK_SIZE], plaintext: &[u8]) -> Vec<u8> {
        (**self).encrypt_padded(iv, plaintext)
    }
}

impl<P: OneShotCbc + ?Sized> OneShotCbc for Box<P> {
    #[inline(always)]
    fn encrypt_padded(&self, iv: &[u8; BLOCK_SIZE], plaintext: &[u8]) -> Vec<u8> {
        (**self).encrypt_padded(iv, plaintext)
    }
}

/// AES-256 one-shot CBC encryptor holding an encrypt-only key schedule.
pub struct Aes256CbcOneShot {
    cipher: Aes256Enc,
}

impl Aes256CbcOneShot {
    /// Import the 32-byte key into an encrypt-only AES-256 key schedule.
    #[inline]
    pub fn new(key: &Aes256Key32) -> Self {
        Self {
            cipher: Aes256Enc::new(key.expose_secret().into()),
        }
    }

    #[inline(always)]
    fn encrypt_block_into(&self, plaintext_block: &[u8], prev: &mut Block16, out: &mut Vec<u8>) {
        let mut aes_block = AesBlock::default();
        xor_blocks(
            plaintext_block,
            prev.expose_secret(),
            aes_block.as_mut_slice(),
        );
        self.cipher.encrypt_block(&mut aes_block);
        out.extend_from_slice(aes_block.as_slice());
        prev.expose_secret_mut()
            .copy_from_slice(aes_block.as_slice());
    }
}

impl OneShotCbc for Aes256CbcOneShot {
    fn encrypt_padded(&self, iv: &[u8; BLOCK_SIZE], plaintext: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(padded_len(plaintext.len()));
        let mut prev = Block16::new(*iv);

        let mut blocks = plaintext.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            self.encrypt_block_into(block, &mut prev, &mut out);
        }

        // PKCS#7: a full block of 0x10 when the input was aligned
        let remainder = blocks.remainder();
        let pad = (BLOCK_SIZE - remainder.len()) as u8;
        let mut last = Block16::new([pad; BLOCK_SIZE]);
        let bytes = last.expose_secret_mut();
        bytes[..remainder.len()].copy_from_slice(remainder);
        self.encrypt_block_into(last.expose_secret(), &mut prev, &mut out);

        out
    }
}

impl fmt::Debug for Aes256CbcOneShot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aes256CbcOneShot").finish_non_exhaustive()
    }
}
