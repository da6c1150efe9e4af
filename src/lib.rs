// src/lib.rs
//! rotating-envelope-vault — a single-record encrypted store
//!
//! Features:
//! - AES-256-GCM payload encryption under a one-time scrypt-derived key
//! - RSA-OAEP wrapped bulk key, PKCS#8-encrypted private key
//! - Exactly one live slot per resource kind, consumed on read
//! - Full key rotation on every successful load

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod enums;
pub mod store;
pub mod vault;

pub mod error;

// Re-export everything users need at the crate root
pub use config::load as load_config;
pub use config::Config;
pub use enums::SlotKind;
pub use error::{ErrorCode, ErrorKind, Result, VaultError};
pub use store::SlotStore;
pub use vault::{AcceptAll, Suppress, TryLoadOptions, Validator, Vault};
