//! Installation code parsing, validation, and link key derivation
//!
//! An installation code is a 48, 64, 96 or 128 bit secret written as hex and followed
//! by a CRC-16 of the secret. Any character that is not a hex digit is ignored, so
//! codes may be grouped with dashes or spaces. The link key is the AES-MMO hash of
//! the whole code, CRC included.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;

use crate::crypto::crc16::{self, CHECKSUM_LEN};
use crate::crypto::mmo;
use crate::error::InstallCodeError;

/// Link key length in bytes
pub const LINK_KEY_LEN: usize = mmo::HASH_LEN;

/// 128-bit link key
pub type LinkKey = [u8; LINK_KEY_LEN];

/// Hex digits occupied by the trailing CRC
const CHECKSUM_DIGITS: usize = CHECKSUM_LEN * 2;

/// Legal installation code sizes, excluding the CRC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeLength {
    Bits48,
    Bits64,
    Bits96,
    Bits128,
}

impl CodeLength {
    pub const ALL: [CodeLength; 4] = [Self::Bits48, Self::Bits64, Self::Bits96, Self::Bits128];

    pub fn from_bits(bits: usize) -> Option<Self> {
        match bits {
            48 => Some(Self::Bits48),
            64 => Some(Self::Bits64),
            96 => Some(Self::Bits96),
            128 => Some(Self::Bits128),
            _ => None,
        }
    }

    pub fn from_secret_len(len: usize) -> Option<Self> {
        len.checked_mul(8).and_then(Self::from_bits)
    }

    pub fn bits(self) -> usize {
        match self {
            Self::Bits48 => 48,
            Self::Bits64 => 64,
            Self::Bits96 => 96,
            Self::Bits128 => 128,
        }
    }

    /// Secret size in bytes
    pub fn secret_len(self) -> usize {
        self.bits() / 8
    }

    /// Hex digits of a full code, CRC included
    pub fn hex_digits(self) -> usize {
        self.bits() / 4 + CHECKSUM_DIGITS
    }
}

impl fmt::Display for CodeLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

impl FromStr for CodeLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_end_matches("-bit");
        digits
            .parse::<usize>()
            .ok()
            .and_then(Self::from_bits)
            .ok_or_else(|| format!("expected 48, 64, 96 or 128, got: {}", s))
    }
}

/// A checksum-verified installation code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCode {
    secret: Vec<u8>,
    length: CodeLength,
}

impl InstallCode {
    /// Parse and verify an installation code string
    pub fn parse(raw: &str) -> Result<Self, InstallCodeError> {
        let normalized = normalize(raw);
        let digits = normalized.len();

        let length = digits
            .checked_sub(CHECKSUM_DIGITS)
            .and_then(|secret_digits| CodeLength::from_bits(secret_digits * 4))
            .ok_or(InstallCodeError::InvalidLength { digits })?;

        let bytes = hex::decode(&normalized).map_err(|_| InstallCodeError::InvalidHex)?;
        if bytes.len() != length.secret_len() + CHECKSUM_LEN {
            return Err(InstallCodeError::InvalidHex);
        }

        let (secret, given) = bytes.split_at(length.secret_len());
        let calculated = crc16::checksum_bytes(secret);

        if given != calculated.as_slice() {
            let given = u16::from_be_bytes([given[0], given[1]]);
            let calculated = u16::from_be_bytes(calculated);
            tracing::debug!(
                "Install code CRC mismatch: given {:04X}, calculated {:04X}",
                given,
                calculated
            );
            return Err(InstallCodeError::ChecksumMismatch { given, calculated });
        }

        tracing::debug!("Validated {} install code", length);
        Ok(Self {
            secret: secret.to_vec(),
            length,
        })
    }

    /// Build a code from a raw secret, computing its CRC
    pub fn from_secret(secret: &[u8]) -> Result<Self, InstallCodeError> {
        let length = CodeLength::from_secret_len(secret.len()).ok_or(
            InstallCodeError::InvalidLength {
                digits: secret.len() * 2 + CHECKSUM_DIGITS,
            },
        )?;
        Ok(Self {
            secret: secret.to_vec(),
            length,
        })
    }

    /// Generate a code with a random secret
    pub fn random<R: RngCore + ?Sized>(length: CodeLength, rng: &mut R) -> Self {
        let mut secret = vec![0u8; length.secret_len()];
        rng.fill_bytes(&mut secret);
        Self { secret, length }
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn into_secret(self) -> Vec<u8> {
        self.secret
    }

    pub fn length(&self) -> CodeLength {
        self.length
    }

    /// CRC bytes as they appear at the end of the code
    pub fn checksum(&self) -> [u8; CHECKSUM_LEN] {
        crc16::checksum_bytes(&self.secret)
    }

    /// Secret followed by its CRC, as written in the code
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.secret.len() + CHECKSUM_LEN);
        bytes.extend_from_slice(&self.secret);
        bytes.extend_from_slice(&self.checksum());
        bytes
    }

    /// Derive the link key from the secret and its CRC
    pub fn link_key(&self) -> LinkKey {
        mmo::hash(&self.to_bytes())
    }
}

impl fmt::Display for InstallCode {
    /// Uppercase hex, secret followed by CRC
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.to_bytes()))
    }
}

impl FromStr for InstallCode {
    type Err = InstallCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Keep only the hex digits of `raw`, uppercased
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Validate an installation code and return its secret
pub fn validate(raw: &str) -> Result<Vec<u8>, InstallCodeError> {
    InstallCode::parse(raw).map(InstallCode::into_secret)
}

/// Convert an installation code into its link key
pub fn decode(raw: &str) -> Result<LinkKey, InstallCodeError> {
    InstallCode::parse(raw).map(|code| code.link_key())
}

/// Append the CRC to a secret and hex encode it
pub fn encode(secret: &[u8]) -> Result<String, InstallCodeError> {
    InstallCode::from_secret(secret).map(|code| code.to_string())
}
