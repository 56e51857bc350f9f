//! linkkey - Installation Code to Link Key Derivation
//!
//! Converts the installation codes printed on mesh network devices into the
//! 128-bit link keys used to join them to a network.
//!
//! # Features
//!
//! - 48, 64, 96 and 128 bit installation codes
//! - CRC-16/X-25 verification of the appended checksum
//! - AES-128 Matyas-Meyer-Oseas hashing of the verified secret
//! - Separators and letter case in the code are ignored
//!
//! # Usage
//!
//! ```
//! let key = linkkey::decode("83FE-D340-7A93-9723-A5C6-39B2-6916-D505-C3B5")?;
//! assert_eq!(hex::encode(key), "66b6900981e1ee3ca4206b6b861c02bb");
//! # Ok::<(), linkkey::InstallCodeError>(())
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod install_code;
pub mod report;

pub use config::{CodeEntry, CodeList};
pub use error::{InstallCodeError, LinkKeyError};
pub use install_code::{decode, encode, validate, CodeLength, InstallCode, LinkKey};
pub use report::{BatchReport, KeyReport};
