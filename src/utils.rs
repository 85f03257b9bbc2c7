//! Block arithmetic shared by the primitive, the chain and the pump.

use crate::consts::BLOCK_SIZE;

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// # Panics (by contract)
///
/// Panics if any of the three slices is shorter than 16 bytes. All callers
/// pass exact 16-byte blocks.
#[inline(always)]
pub fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < BLOCK_SIZE {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// `true` when `len` is a whole number of AES blocks (zero included).
#[inline(always)]
pub const fn is_block_aligned(len: usize) -> bool {
    len % BLOCK_SIZE == 0
}

/// Length of `len` bytes after PKCS#7 padding.
///
/// Padding is always added, so an aligned input grows by a full block.
#[inline(always)]
pub const fn padded_len(len: usize) -> usize {
    (len / BLOCK_SIZE + 1) * BLOCK_SIZE
}
