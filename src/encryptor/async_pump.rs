//! src/encryptor/async_pump.rs
//! Tokio front end for the pump
//!
//! Same staging discipline as the blocking pump. The chain writes each
//! flush's ciphertext into an output buffer which is written to the sink with
//! backpressure and then released, so only the staging buffer stays allocated
//! while the task waits on the source.

use crate::crypto::oneshot::OneShotCbc;
use crate::encryptor::chain::BlockCipherChain;
use crate::encryptor::pump::{check_buffer_size, PumpReport, Staging};
use crate::error::CodecError;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Encrypt everything `source` yields into `sink`, then shut the sink down.
///
/// The sink is shut down exactly once whether the pump succeeds or fails.
/// If the future is dropped before completion nothing closes the sink; the
/// caller owns it and decides.
pub async fn pump_async<P, R, W>(
    chain: BlockCipherChain<P>,
    source: &mut R,
    sink: &mut W,
    buffer_size: usize,
) -> Result<PumpReport, CodecError>
where
    P: OneShotCbc,
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let result = pump_inner(chain, source, sink, buffer_size).await;
    let closed = sink.shutdown().await;

    match (result, closed) {
        (Ok(report), Ok(())) => {
            debug!(
                bytes_read = report.bytes_read,
                bytes_written = report.bytes_written,
                flushes = report.flushes,
                "async pump complete"
            );
            Ok(report)
        }
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!(error = %close_err, "failed to shut down sink after aborted stream");
            Err(e)
        }
    }
}

async fn pump_inner<P, R, W>(
    mut chain: BlockCipherChain<P>,
    source: &mut R,
    sink: &mut W,
    buffer_size: usize,
) -> Result<PumpReport, CodecError>
where
    P: OneShotCbc,
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    check_buffer_size(buffer_size)?;
    debug!(buffer_size, "pumping async reader");

    let mut out = Vec::new();
    chain.emit_iv(&mut out)?;
    sink.write_all(&out).await?;
    out = Vec::new();

    let mut staging = Staging::new(buffer_size);
    loop {
        let n = source.read(staging.unfilled_mut()).await?;
        if n == 0 {
            break;
        }
        staging.commit(n, &mut chain, &mut out)?;
        if !out.is_empty() {
            sink.write_all(&out).await?;
            out = Vec::new();
        }
    }

    let report = staging.finish(&mut chain, &mut out)?;
    sink.write_all(&out).await?;
    sink.flush().await?;
    Ok(report)
}
