//! Matyas-Meyer-Oseas hash over AES-128
//!
//! The chaining value keys the cipher and is fed forward by XOR:
//! `H_i = E(H_{i-1}, M_i) ^ M_i`, starting from an all-zero `H_0`.
//! Messages are padded with 0x80, zeros, and a 16-bit big-endian bit count.

use super::aes::{encrypt_block, BLOCK_LEN};

/// Length of the hash output (one AES block)
pub const HASH_LEN: usize = BLOCK_LEN;

/// Trailing length field size in bytes
const LENGTH_FIELD_LEN: usize = 2;

/// Pad a message to a whole number of blocks
///
/// The length field holds the bit length of the unpadded message truncated to
/// 16 bits. Installation codes are at most 18 bytes with their CRC, so it never wraps there.
pub fn pad(message: &[u8]) -> Vec<u8> {
    let used = (message.len() + 1 + LENGTH_FIELD_LEN) % BLOCK_LEN;
    let zeros = (BLOCK_LEN - used) % BLOCK_LEN;
    let bit_len = message.len().wrapping_mul(8) as u16;

    let mut padded = Vec::with_capacity(message.len() + 1 + zeros + LENGTH_FIELD_LEN);
    padded.extend_from_slice(message);
    padded.push(0x80);
    padded.resize(padded.len() + zeros, 0x00);
    padded.extend_from_slice(&bit_len.to_be_bytes());
    padded
}

/// One compression step: encrypt the block under the chaining value, then XOR the block back in
fn compress(state: &[u8; HASH_LEN], block: &[u8; BLOCK_LEN]) -> [u8; HASH_LEN] {
    let mut next = encrypt_block(state, block);
    for (out, m) in next.iter_mut().zip(block.iter()) {
        *out ^= m;
    }
    next
}

/// Hash an arbitrary message to 16 bytes
pub fn hash(message: &[u8]) -> [u8; HASH_LEN] {
    let padded = pad(message);
    tracing::trace!(
        message_len = message.len(),
        blocks = padded.len() / BLOCK_LEN,
        "MMO hash"
    );

    let mut state = [0u8; HASH_LEN];
    for chunk in padded.chunks_exact(BLOCK_LEN) {
        let mut block = [0u8; BLOCK_LEN];
        block.copy_from_slice(chunk);
        state = compress(&state, &block);
    }
    state
}
