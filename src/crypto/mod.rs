//! Cryptographic primitives for link key derivation
//!
//! This module provides the building blocks used to turn an installation code into a link key:
//! - CRC-16 checksum over the installation code secret (crc16)
//! - AES-128 single-block encryption (aes)
//! - Matyas-Meyer-Oseas hash built on AES-128 (mmo)

pub mod aes;
pub mod crc16;
pub mod mmo;
