//! Parallel encryption of independent streams.
//!
//! Every job gets its own session; parallelism is across streams only.

use rayon::prelude::*;
use std::io::Read;

use crate::aliases::{Aes256Key32, Iv16};
use crate::encryptor::{encrypt, ByteSink, PumpReport};
use crate::error::CodecError;

/// Encrypt each `(iv, source, sink)` job under the same keys, in parallel.
///
/// Stops at the first failure; sinks of jobs that ran are closed either way.
/// IVs must be unique per job.
pub fn encrypt_batch<R, W>(
    batch: &mut [(Iv16, R, W)],
    mac_key: &Aes256Key32,
    cipher_key: &Aes256Key32,
) -> Result<Vec<PumpReport>, CodecError>
where
    R: Read + Send,
    W: ByteSink + Send,
{
    batch
        .par_iter_mut()
        .map(|(iv, src, dst)| encrypt(src, dst, iv, mac_key, cipher_key))
        .collect()
}
