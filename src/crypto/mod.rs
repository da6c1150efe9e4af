// src/crypto/mod.rs
//! Envelope encryption engine
//!
//! [`keys`] produces fresh key material, [`envelope`] composes it into a
//! stored record: AES-256-GCM over the payload, RSA-OAEP over the bulk key,
//! and an encrypted PKCS#8 private key locked behind the nonce.

pub mod envelope;
pub mod keys;

use thiserror::Error;

pub use envelope::EnvelopeCipher;
pub use keys::{generate_key_pair, generate_nonce, generate_passphrase, KeyPair};

/// Errors raised by the envelope engine. None of them carry a vault error
/// code; they surface to callers unclassified.
#[derive(Error, Debug)]
pub enum CryptoError {
    // =========================================================================
    // INTEGRITY VIOLATIONS
    // =========================================================================
    /// GCM tag verification failed.
    ///
    /// **[INTEGRITY VIOLATION]** The ciphertext, tag or key material was
    /// tampered with or corrupted. Never treat this as "nothing stored".
    #[error("[INTEGRITY VIOLATION] authentication tag mismatch - payload corrupt or tampered")]
    Authentication,

    /// The protected private key could not be opened with the stored nonce.
    #[error("Private key unwrap failed: {0}")]
    PrivateKeyUnwrap(pkcs8::Error),

    /// OAEP decryption of the stored passphrase failed.
    #[error("Passphrase unwrap failed: {0}")]
    PassphraseUnwrap(rsa::Error),

    /// A stored slot had the wrong size for what it claims to hold.
    #[error("Invalid {what} length: expected {expected}, got {actual}")]
    InvalidKeyMaterial {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    // =========================================================================
    // GENERATION FAILURES
    // =========================================================================
    #[error("Key pair generation failed: {0}")]
    KeyGeneration(rsa::Error),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Private key wrap failed: {0}")]
    PrivateKeyWrap(pkcs8::Error),

    #[error("Passphrase wrap failed: {0}")]
    PassphraseWrap(rsa::Error),

    #[error("Payload encryption failed")]
    Encryption,
}

/// Copy `bytes` into a fixed array, naming `what` on a size mismatch
pub(crate) fn fixed<const N: usize>(
    what: &'static str,
    bytes: &[u8],
) -> Result<[u8; N], CryptoError> {
    <[u8; N]>::try_from(bytes).map_err(|_| CryptoError::InvalidKeyMaterial {
        what,
        expected: N,
        actual: bytes.len(),
    })
}
