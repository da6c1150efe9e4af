// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the resource kinds the slot store manages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every resource the vault persists lives in exactly one slot of its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotKind {
    /// Encrypted payload
    Payload,
    Nonce,
    AuthTag,
    /// PKCS#8 PEM, encrypted under the nonce
    PrivateKey,
    /// RSA-OAEP wrapped bulk key
    Passphrase,
}

/// Which configured root a kind lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRoot {
    Storage,
    Keys,
}

impl SlotKind {
    pub const ALL: [SlotKind; 5] = [
        SlotKind::Payload,
        SlotKind::Nonce,
        SlotKind::AuthTag,
        SlotKind::PrivateKey,
        SlotKind::Passphrase,
    ];

    /// The four kinds the envelope cipher writes alongside the payload
    pub const KEY_MATERIAL: [SlotKind; 4] = [
        SlotKind::Nonce,
        SlotKind::AuthTag,
        SlotKind::PrivateKey,
        SlotKind::Passphrase,
    ];

    /// Filename prefix; a slot file is `<prefix><suffix>`
    pub const fn prefix(self) -> &'static str {
        match self {
            SlotKind::Payload => "storage-",
            SlotKind::Nonce => "nonce-",
            SlotKind::AuthTag => "tag-",
            SlotKind::PrivateKey => "pk-",
            SlotKind::Passphrase => "pp-",
        }
    }

    pub const fn root(self) -> SlotRoot {
        match self {
            SlotKind::Payload => SlotRoot::Storage,
            _ => SlotRoot::Keys,
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlotKind::Payload => "data",
            SlotKind::Nonce => "nonce",
            SlotKind::AuthTag => "authentication tag",
            SlotKind::PrivateKey => "private key",
            SlotKind::Passphrase => "passphrase",
        };
        f.write_str(name)
    }
}
