//! tests/common.rs
//! Shared keys, a reference verifier/decryptor and instrumented sources/sinks

#![allow(dead_code)] // each test crate uses a different subset

use aes::cipher::{BlockDecrypt, KeyInit};
use aes::{Aes256Dec, Block as AesBlock};
use cbc_hmac_stream::aliases::{Aes256Key32, HmacSha256, Iv16};
use cbc_hmac_stream::{BlockCipherChain, ByteSink};
use hmac::Mac;
use std::io::{self, Read, Write};

pub const TEST_IV: [u8; 16] = [0x10; 16];
pub const TEST_MAC_KEY: [u8; 32] = [0x20; 32];
pub const TEST_CIPHER_KEY: [u8; 32] = [0x30; 32];

/// Small buffer size so modest inputs still cross several flushes.
pub const SMALL_BUFFER: usize = 64;

pub fn test_chain() -> BlockCipherChain {
    BlockCipherChain::new(&TEST_IV, &TEST_MAC_KEY, &TEST_CIPHER_KEY).unwrap()
}

pub fn test_keys() -> (Iv16, Aes256Key32, Aes256Key32) {
    (
        Iv16::new(TEST_IV),
        Aes256Key32::new(TEST_MAC_KEY),
        Aes256Key32::new(TEST_CIPHER_KEY),
    )
}

/// Deterministic, non-repeating-looking plaintext.
pub fn sample_plaintext(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| (i.wrapping_mul(31) ^ (i >> 8)) as u8)
        .collect()
}

/// Why a stream failed to verify.
#[derive(Debug, PartialEq, Eq)]
pub enum VerifyError {
    Length(usize),
    Tag,
    Padding,
}

/// Reference reader for `IV || ciphertext || tag`: checks the tag first, then
/// decrypts AES-256-CBC and strips PKCS#7 padding.
pub fn decrypt_and_verify(
    data: &[u8],
    mac_key: &[u8; 32],
    cipher_key: &[u8; 32],
) -> Result<Vec<u8>, VerifyError> {
    if data.len() < 64 || (data.len() - 48) % 16 != 0 {
        return Err(VerifyError::Length(data.len()));
    }
    let (authenticated, tag) = data.split_at(data.len() - 32);

    let mut mac = <HmacSha256 as Mac>::new_from_slice(mac_key).unwrap();
    mac.update(authenticated);
    mac.verify_slice(tag).map_err(|_| VerifyError::Tag)?;

    let (iv, ciphertext) = authenticated.split_at(16);
    let cipher = Aes256Dec::new(cipher_key.into());
    let mut prev = [0u8; 16];
    prev.copy_from_slice(iv);

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for chunk in ciphertext.chunks_exact(16) {
        let mut block = AesBlock::clone_from_slice(chunk);
        cipher.decrypt_block(&mut block);
        plaintext.extend(block.iter().zip(prev.iter()).map(|(b, p)| b ^ p));
        prev.copy_from_slice(chunk);
    }

    let pad = *plaintext.last().ok_or(VerifyError::Padding)? as usize;
    if pad == 0
        || pad > 16
        || plaintext[plaintext.len() - pad..]
            .iter()
            .any(|&b| b as usize != pad)
    {
        return Err(VerifyError::Padding);
    }
    plaintext.truncate(plaintext.len() - pad);
    Ok(plaintext)
}

pub fn decrypt_with_test_keys(data: &[u8]) -> Result<Vec<u8>, VerifyError> {
    decrypt_and_verify(data, &TEST_MAC_KEY, &TEST_CIPHER_KEY)
}

/// Sink that records writes and closes, optionally failing once it has
/// accepted `fail_after` bytes.
#[derive(Default)]
pub struct RecordingSink {
    pub data: Vec<u8>,
    pub writes: usize,
    pub closes: usize,
    pub fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn failing_after(limit: usize) -> Self {
        Self {
            fail_after: Some(limit),
            ..Self::default()
        }
    }
}

impl Write for RecordingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(limit) = self.fail_after {
            if self.data.len() + buf.len() > limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink full"));
            }
        }
        self.writes += 1;
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ByteSink for RecordingSink {
    fn close(&mut self) -> io::Result<()> {
        self.closes += 1;
        Ok(())
    }
}

/// Reader that hands out at most `step` bytes per call.
pub struct TrickleReader<'a> {
    data: &'a [u8],
    step: usize,
    pub reads: usize,
}

impl<'a> TrickleReader<'a> {
    pub fn new(data: &'a [u8], step: usize) -> Self {
        Self {
            data,
            step,
            reads: 0,
        }
    }
}

impl Read for TrickleReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Reader that fails with `Interrupted` before every data read until
/// `interruptions` have been spent, handing out at most `step` bytes per read.
pub struct InterruptingReader<'a> {
    data: &'a [u8],
    step: usize,
    pub interruptions: usize,
    interrupt_next: bool,
}

impl<'a> InterruptingReader<'a> {
    pub fn new(data: &'a [u8], step: usize, interruptions: usize) -> Self {
        Self {
            data,
            step,
            interruptions,
            interrupt_next: true,
        }
    }
}

impl Read for InterruptingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_next && self.interruptions > 0 {
            self.interruptions -= 1;
            self.interrupt_next = false;
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.interrupt_next = true;
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Reader that yields `good` bytes and then fails.
pub struct FailingReader {
    good: usize,
    reads: usize,
}

impl FailingReader {
    pub fn new(good: usize) -> Self {
        Self { good, reads: 0 }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        if self.good == 0 {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "source died",
            ));
        }
        let n = self.good.min(buf.len());
        buf[..n].fill(0x77);
        self.good -= n;
        Ok(n)
    }
}

/// Reader that panics if touched.
pub struct UntouchableReader;

impl Read for UntouchableReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        panic!("source must not be read");
    }
}
