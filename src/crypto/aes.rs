//! AES-128 block encryption
//!
//! Only the forward direction of a single block is needed by the MMO hash.

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes128;

/// AES-128 key length
pub const KEY_LEN: usize = 16;

/// AES block length
pub const BLOCK_LEN: usize = 16;

/// Encrypt one 16-byte block with a fresh AES-128 key schedule
pub fn encrypt_block(key: &[u8; KEY_LEN], block: &[u8; BLOCK_LEN]) -> [u8; BLOCK_LEN] {
    let cipher = Aes128::new(GenericArray::from_slice(key));

    let mut buf = GenericArray::clone_from_slice(block);
    cipher.encrypt_block(&mut buf);

    let mut out = [0u8; BLOCK_LEN];
    out.copy_from_slice(&buf);
    out
}
