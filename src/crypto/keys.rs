// src/crypto/keys.rs
//! Fresh key material for every encryption
//!
//! RSA generation and scrypt are CPU-bound; both run on the blocking pool.

use aes_gcm::aead::OsRng;
use rand::RngCore;
use rsa::{RsaPrivateKey, RsaPublicKey};
use scrypt::{scrypt, Params};
use tokio::task;

use super::CryptoError;
use crate::aliases::{Nonce32, Passphrase32, ScryptSeed32};
use crate::consts::{NONCE_SIZE, PASSPHRASE_SIZE, SCRYPT_P, SCRYPT_R};
use crate::error::Result;

pub struct KeyPair {
    pub private: RsaPrivateKey,
    pub public: RsaPublicKey,
}

/// 32 bytes from the CSPRNG
pub fn generate_nonce() -> Nonce32 {
    let mut bytes = [0u8; NONCE_SIZE];
    rand::rng().fill_bytes(&mut bytes);
    Nonce32::new(bytes)
}

pub async fn generate_key_pair(bits: usize) -> Result<KeyPair> {
    let private = task::spawn_blocking(move || RsaPrivateKey::new(&mut OsRng, bits))
        .await?
        .map_err(CryptoError::KeyGeneration)?;
    let public = private.to_public_key();
    Ok(KeyPair { private, public })
}

/// scrypt over fresh random bytes, salted with the nonce
pub async fn generate_passphrase(nonce: &Nonce32, scrypt_log_n: u8) -> Result<Passphrase32> {
    let salt = *nonce.expose_secret();
    let derived = task::spawn_blocking(move || derive(&salt, scrypt_log_n)).await??;
    Ok(Passphrase32::new(derived))
}

fn derive(
    salt: &[u8; NONCE_SIZE],
    log_n: u8,
) -> std::result::Result<[u8; PASSPHRASE_SIZE], CryptoError> {
    let mut bytes = [0u8; PASSPHRASE_SIZE];
    rand::rng().fill_bytes(&mut bytes);
    let seed = ScryptSeed32::new(bytes);

    let params = Params::new(log_n, SCRYPT_R, SCRYPT_P, PASSPHRASE_SIZE)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    let mut out = [0u8; PASSPHRASE_SIZE];
    scrypt(seed.expose_secret(), salt, &params, &mut out)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    Ok(out)
}
