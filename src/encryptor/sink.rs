//! src/encryptor/sink.rs
//! Byte sinks that can be closed, and the guard that closes them exactly once

use std::fs::File;
use std::io::{self, BufWriter, Cursor, Write};
use tracing::warn;

/// A destination for encrypted bytes.
///
/// `close` releases the destination once the stream is complete or has
/// failed. The default implementation flushes.
pub trait ByteSink: Write {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl ByteSink for Vec<u8> {}

impl ByteSink for io::Sink {}

impl<T> ByteSink for Cursor<T> where Cursor<T>: Write {}

impl<W: Write> ByteSink for BufWriter<W> {}

impl ByteSink for File {
    fn close(&mut self) -> io::Result<()> {
        self.flush()?;
        self.sync_all()
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    #[inline]
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<S: ByteSink + ?Sized> ByteSink for Box<S> {
    #[inline]
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Scoped ownership of a sink: closed by [`SinkGuard::close`] on the success
/// path, or on drop if the pump bailed out early (errors and panics alike).
pub(crate) struct SinkGuard<'a, S: ByteSink + ?Sized> {
    sink: &'a mut S,
    closed: bool,
}

impl<'a, S: ByteSink + ?Sized> SinkGuard<'a, S> {
    #[inline]
    pub(crate) fn new(sink: &'a mut S) -> Self {
        Self {
            sink,
            closed: false,
        }
    }

    #[inline(always)]
    pub(crate) fn sink(&mut self) -> &mut S {
        &mut *self.sink
    }

    /// Close the sink and surface the result.
    pub(crate) fn close(mut self) -> io::Result<()> {
        self.closed = true;
        self.sink.close()
    }
}

impl<S: ByteSink + ?Sized> Drop for SinkGuard<'_, S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.sink.close() {
            warn!(error = %e, "failed to close sink after aborted stream");
        }
    }
}
