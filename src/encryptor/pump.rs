//! src/encryptor/pump.rs
//! Adapts arbitrary chunked sources to the chain's aligned-buffer contract
//!
//! A single staging buffer (a multiple of 16 bytes) is filled from the source.
//! Every time it is exactly full it is handed to the chain; at end of source
//! the remaining tail, possibly empty, goes to `finish`. Memory use is the
//! staging buffer plus one ciphertext buffer of the same size, whatever the
//! source's chunking.

use crate::aliases::StagingBuffer;
use crate::crypto::oneshot::OneShotCbc;
use crate::encryptor::chain::BlockCipherChain;
use crate::encryptor::sink::{ByteSink, SinkGuard};
use crate::error::CodecError;
use crate::utils::is_block_aligned;
use std::io::{self, ErrorKind, Read, Write};
use tracing::debug;

/// What a pump moved, returned on success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    /// Plaintext bytes consumed from the source.
    pub bytes_read: u64,
    /// Bytes written to the sink: IV, ciphertext and tag.
    pub bytes_written: u64,
    /// Number of full staging buffers handed to `encrypt_aligned`.
    pub flushes: u64,
    /// Length of the tail passed to `finish`.
    pub tail_len: usize,
}

/// Reject buffer sizes the chain cannot accept.
#[inline]
pub(crate) fn check_buffer_size(buffer_size: usize) -> Result<(), CodecError> {
    if buffer_size == 0 {
        return Err(CodecError::InvalidParameter(
            "buffer size must be non-zero".into(),
        ));
    }
    if !is_block_aligned(buffer_size) {
        return Err(CodecError::alignment(buffer_size));
    }
    Ok(())
}

/// Plaintext awaiting encryption, plus the bookkeeping for [`PumpReport`].
pub(crate) struct Staging {
    buf: StagingBuffer,
    filled: usize,
    flushes: u64,
    bytes_read: u64,
}

impl Staging {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buf: StagingBuffer::new(vec![0u8; capacity]),
            filled: 0,
            flushes: 0,
            bytes_read: 0,
        }
    }

    #[inline(always)]
    fn capacity(&self) -> usize {
        self.buf.expose_secret().len()
    }

    /// The free part of the buffer. Never empty between calls.
    #[inline(always)]
    pub(crate) fn unfilled_mut(&mut self) -> &mut [u8] {
        let filled = self.filled;
        &mut self.buf.expose_secret_mut()[filled..]
    }

    /// Account for `n` bytes just written into [`unfilled_mut`](Self::unfilled_mut),
    /// flushing if the buffer is now full.
    ///
    /// A count larger than the free space means the source misreported a
    /// read and fails with [`CodecError::Io`].
    pub(crate) fn commit<P, W>(
        &mut self,
        n: usize,
        chain: &mut BlockCipherChain<P>,
        sink: &mut W,
    ) -> Result<(), CodecError>
    where
        P: OneShotCbc,
        W: Write + ?Sized,
    {
        let free = self.capacity() - self.filled;
        if n > free {
            let msg = format!("source reported {n} bytes read into a {free}-byte buffer");
            return Err(io::Error::other(msg).into());
        }
        self.filled += n;
        self.bytes_read += n as u64;
        if self.filled == self.capacity() {
            chain.encrypt_aligned(sink, self.buf.expose_secret())?;
            self.filled = 0;
            self.flushes += 1;
        }
        Ok(())
    }

    /// Copy a chunk of any length in, flushing as many times as it fills the buffer.
    pub(crate) fn absorb<P, W>(
        &mut self,
        mut chunk: &[u8],
        chain: &mut BlockCipherChain<P>,
        sink: &mut W,
    ) -> Result<(), CodecError>
    where
        P: OneShotCbc,
        W: Write + ?Sized,
    {
        while !chunk.is_empty() {
            let take = (self.capacity() - self.filled).min(chunk.len());
            self.unfilled_mut()[..take].copy_from_slice(&chunk[..take]);
            chunk = &chunk[take..];
            self.commit(take, chain, sink)?;
        }
        Ok(())
    }

    /// Hand the tail to `finish`. Called exactly once, even for an empty tail.
    pub(crate) fn finish<P, W>(
        self,
        chain: &mut BlockCipherChain<P>,
        sink: &mut W,
    ) -> Result<PumpReport, CodecError>
    where
        P: OneShotCbc,
        W: Write + ?Sized,
    {
        chain.finish(sink, &self.buf.expose_secret()[..self.filled])?;
        Ok(PumpReport {
            bytes_read: self.bytes_read,
            bytes_written: chain.bytes_emitted(),
            flushes: self.flushes,
            tail_len: self.filled,
        })
    }
}

/// Encrypt everything `source` yields into `sink`.
///
/// The source is read straight into the staging buffer. The sink is closed
/// exactly once on every exit path; on failure, whatever was already written
/// stays written and the destination must be discarded by the caller.
///
/// # Errors
///
/// - [`CodecError::Alignment`] if `buffer_size` is not a multiple of 16,
///   before anything is read
/// - [`CodecError::InvalidParameter`] if `buffer_size` is zero
/// - [`CodecError::Io`] if the source, the sink or the final close fails
/// - any error from the chain
pub fn pump<P, R, S>(
    mut chain: BlockCipherChain<P>,
    mut source: R,
    sink: &mut S,
    buffer_size: usize,
) -> Result<PumpReport, CodecError>
where
    P: OneShotCbc,
    R: Read,
    S: ByteSink + ?Sized,
{
    let mut guard = SinkGuard::new(sink);
    check_buffer_size(buffer_size)?;
    debug!(buffer_size, "pumping reader");

    chain.emit_iv(guard.sink())?;

    let mut staging = Staging::new(buffer_size);
    loop {
        let n = match source.read(staging.unfilled_mut()) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        staging.commit(n, &mut chain, guard.sink())?;
    }

    let report = staging.finish(&mut chain, guard.sink())?;
    guard.close()?;

    debug!(
        bytes_read = report.bytes_read,
        bytes_written = report.bytes_written,
        flushes = report.flushes,
        "pump complete"
    );
    Ok(report)
}

/// Encrypt a sequence of chunks into `sink`.
///
/// Chunks may have any length, including zero, and need not line up with
/// block or buffer boundaries. A chunk larger than the buffer causes several
/// flushes.
pub fn pump_chunks<P, I, B, E, S>(
    mut chain: BlockCipherChain<P>,
    chunks: I,
    sink: &mut S,
    buffer_size: usize,
) -> Result<PumpReport, CodecError>
where
    P: OneShotCbc,
    I: IntoIterator<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<CodecError>,
    S: ByteSink + ?Sized,
{
    let mut guard = SinkGuard::new(sink);
    check_buffer_size(buffer_size)?;
    debug!(buffer_size, "pumping chunk sequence");

    chain.emit_iv(guard.sink())?;

    let mut staging = Staging::new(buffer_size);
    for chunk in chunks {
        let chunk = chunk.map_err(Into::into)?;
        staging.absorb(chunk.as_ref(), &mut chain, guard.sink())?;
    }

    let report = staging.finish(&mut chain, guard.sink())?;
    guard.close()?;

    debug!(
        bytes_read = report.bytes_read,
        bytes_written = report.bytes_written,
        flushes = report.flushes,
        "pump complete"
    );
    Ok(report)
}
