// src/error.rs
//! Public error type for the entire crate
//!
//! Three data-layer failures carry a stable code and can be matched or
//! suppressed by callers. Everything else (I/O, crypto, serialization)
//! passes through unclassified.

use std::fmt;

use thiserror::Error;

use crate::crypto::CryptoError;
use crate::enums::SlotKind;

pub type Result<T> = std::result::Result<T, VaultError>;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Cannot validate the loaded data. It may be corrupt. Restore the data from backup or regenerate it.")]
    InvalidData,

    #[error("Cannot detect the saved {kind}. Make sure the data was saved before loading.")]
    NotFound { kind: SlotKind },

    #[error("Multiple variants of the saved {kind} detected ({count} found). Restore the data from backup or regenerate it.")]
    Ambiguous { kind: SlotKind, count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crypto operation failed: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid TOML config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid slot id {0:?}: must be a single file name component")]
    InvalidSlotId(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Classified data-layer failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidData,
    NotFound,
    Ambiguous,
}

/// Stable error codes, rendered as `E<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    LoadedDataInvalid = 0,
    SavedDataNotDetected = 1,
    MultipleSavedDataDetected = 2,
}

impl ErrorCode {
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.as_u16())
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidData => ErrorCode::LoadedDataInvalid,
            ErrorKind::NotFound => ErrorCode::SavedDataNotDetected,
            ErrorKind::Ambiguous => ErrorCode::MultipleSavedDataDetected,
        }
    }
}

impl VaultError {
    /// `None` for pass-through failures
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            VaultError::InvalidData => Some(ErrorKind::InvalidData),
            VaultError::NotFound { .. } => Some(ErrorKind::NotFound),
            VaultError::Ambiguous { .. } => Some(ErrorKind::Ambiguous),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.kind().map(ErrorCode::from)
    }
}
