// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret containers used throughout the vault.
//! Everything here zeroizes on drop.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(Nonce32, 32); // GCM IV + private-key wrapping password
fixed_alias!(Passphrase32, 32); // AES-256-GCM bulk key
fixed_alias!(ScryptSeed32, 32); // fresh randomness fed into scrypt

// Dynamic secrets
dynamic_alias!(PlainText, Vec<u8>);
dynamic_alias!(CypherText, Vec<u8>);
dynamic_alias!(SecretBytes, Vec<u8>); // unwrapped key material of unchecked length
