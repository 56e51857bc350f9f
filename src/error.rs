//! Error types for link key derivation

use thiserror::Error;

/// Main error type for the linkkey tool
#[derive(Error, Debug)]
pub enum LinkKeyError {
    /// Installation code errors
    #[error("Install code error: {0}")]
    Code(#[from] InstallCodeError),

    /// Code list errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Some entries of a code list failed to derive
    #[error("{failed} of {total} install codes failed")]
    Batch { failed: usize, total: usize },

    /// System I/O errors
    #[error("System error: {0}")]
    System(#[from] std::io::Error),
}

/// Installation code validation errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallCodeError {
    /// Hex digit count does not fit a 48, 64, 96 or 128 bit secret plus CRC
    #[error("install code has {digits} hex digits, expected 16, 20, 28 or 36 (48, 64, 96 or 128 bit code plus CRC)")]
    InvalidLength { digits: usize },

    #[error("install code is not valid hex")]
    InvalidHex,

    /// Both values are read big-endian, as they appear in the hex string
    #[error("CRC error on installation code: given = {given:04X}, calc = {calculated:04X}")]
    ChecksumMismatch { given: u16, calculated: u16 },
}

/// Code list file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid code list at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LinkKeyError {
    /// Get a user-friendly error message with suggested action
    pub fn user_message(&self) -> String {
        match self {
            Self::Code(InstallCodeError::InvalidLength { digits }) => {
                format!(
                    "Install code has {} hex digits.\n  \
                    Expected a 12, 16, 24 or 32 digit code followed by a 4 digit CRC.",
                    digits
                )
            }

            Self::Code(InstallCodeError::ChecksumMismatch { given, calculated }) => {
                format!(
                    "Install code CRC mismatch (given {:04X}, calculated {:04X}).\n  \
                    Check the code for transcription errors.",
                    given, calculated
                )
            }

            Self::Config(ConfigError::FileNotFound { path }) => {
                format!(
                    "Code list not found: {}\n  Check the path and try again.",
                    path
                )
            }

            _ => format!("{}", self),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 1,
            Self::Code(_) | Self::Batch { .. } => 2,
            Self::System(_) => 7,
        }
    }
}

/// Result type alias for linkkey operations
pub type Result<T> = std::result::Result<T, LinkKeyError>;
