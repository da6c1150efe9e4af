// src/crypto/envelope.rs
//! Hybrid envelope cipher bound to the slot store
//!
//! `encrypt` writes nonce, protected private key, protected passphrase and
//! auth tag slots and hands back the payload ciphertext; `decrypt` consumes
//! those four slots again. The payload slot itself belongs to the caller.

use aes_gcm::aead::consts::{U16, U32};
use aes_gcm::aead::{AeadInPlace, KeyInit, OsRng};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce, Tag};
use pkcs8::{DecodePrivateKey, EncodePrivateKey, LineEnding};
use rsa::{Oaep, RsaPrivateKey};
use sha2::Sha256;
use tokio::task;
use tracing::{debug, warn};

use super::keys::{generate_key_pair, generate_nonce, generate_passphrase, KeyPair};
use super::{fixed, CryptoError};
use crate::aliases::{CypherText, Nonce32, Passphrase32, PlainText, SecretBytes};
use crate::config::KeyParams;
use crate::consts::{AUTH_TAG_SIZE, NONCE_SIZE, PASSPHRASE_SIZE};
use crate::enums::SlotKind;
use crate::error::Result;
use crate::store::SlotStore;

/// AES-256-GCM keyed by the passphrase, IV = the full 32-byte nonce
type BulkCipher = AesGcm<Aes256, U32>;

#[derive(Debug, Clone)]
pub struct EnvelopeCipher {
    store: SlotStore,
    params: KeyParams,
}

impl EnvelopeCipher {
    pub fn new(store: SlotStore, params: KeyParams) -> Self {
        EnvelopeCipher { store, params }
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    /// Encrypt under brand-new key material and persist everything but the
    /// ciphertext, which is returned.
    pub async fn encrypt(&self, plaintext: &PlainText) -> Result<CypherText> {
        let nonce = generate_nonce();
        let passphrase = generate_passphrase(&nonce, self.params.scrypt_log_n).await?;
        let KeyPair { private, public } = generate_key_pair(self.params.rsa_bits).await?;

        self.store.save(SlotKind::Nonce, nonce.expose_secret()).await?;

        let protected_key = protect_private_key(private, &nonce).await?;
        self.store.save(SlotKind::PrivateKey, &protected_key).await?;

        let wrapped = public
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), passphrase.expose_secret())
            .map_err(CryptoError::PassphraseWrap)?;
        drop(public);
        self.store.save(SlotKind::Passphrase, &wrapped).await?;

        let mut buffer = plaintext.expose_secret().clone();
        let tag = bulk_cipher(&passphrase)?
            .encrypt_in_place_detached(
                Nonce::<U32>::from_slice(nonce.expose_secret()),
                b"",
                &mut buffer,
            )
            .map_err(|_| CryptoError::Encryption)?;
        self.store.save(SlotKind::AuthTag, tag.as_slice()).await?;

        debug!(len = buffer.len(), "payload encrypted under fresh key material");
        Ok(CypherText::new(buffer))
    }

    /// Consume the four key-material slots and open `ciphertext` with them.
    pub async fn decrypt(&self, ciphertext: &CypherText) -> Result<PlainText> {
        let tag = self.store.load(SlotKind::AuthTag).await?;
        let nonce = self.store.load(SlotKind::Nonce).await?;
        let protected_key = self.store.load(SlotKind::PrivateKey).await?;
        let wrapped = self.store.load(SlotKind::Passphrase).await?;

        let tag: [u8; AUTH_TAG_SIZE] = fixed("authentication tag", &tag)?;
        let nonce = Nonce32::new(fixed::<NONCE_SIZE>("nonce", &nonce)?);

        let passphrase = unwrap_passphrase(protected_key, wrapped, &nonce).await?;

        let mut buffer = ciphertext.expose_secret().clone();
        bulk_cipher(&passphrase)?
            .decrypt_in_place_detached(
                Nonce::<U32>::from_slice(nonce.expose_secret()),
                b"",
                &mut buffer,
                Tag::<U16>::from_slice(&tag),
            )
            .map_err(|_| {
                warn!("payload authentication failed");
                CryptoError::Authentication
            })?;

        debug!(len = buffer.len(), "payload decrypted");
        Ok(PlainText::new(buffer))
    }
}

fn bulk_cipher(passphrase: &Passphrase32) -> std::result::Result<BulkCipher, CryptoError> {
    BulkCipher::new_from_slice(passphrase.expose_secret()).map_err(|_| {
        CryptoError::InvalidKeyMaterial {
            what: "passphrase",
            expected: PASSPHRASE_SIZE,
            actual: passphrase.expose_secret().len(),
        }
    })
}

/// Encrypted PKCS#8 PEM with the nonce as password
async fn protect_private_key(private: RsaPrivateKey, nonce: &Nonce32) -> Result<Vec<u8>> {
    let password = *nonce.expose_secret();
    let pem = task::spawn_blocking(move || {
        private
            .to_pkcs8_encrypted_pem(OsRng, password, LineEnding::LF)
            .map(|pem| pem.as_bytes().to_vec())
    })
    .await?
    .map_err(CryptoError::PrivateKeyWrap)?;
    Ok(pem)
}

/// Open the private key with the nonce, then OAEP-decrypt the passphrase.
/// The private key never leaves the blocking task.
async fn unwrap_passphrase(
    protected_key: Vec<u8>,
    wrapped: Vec<u8>,
    nonce: &Nonce32,
) -> Result<Passphrase32> {
    let password = *nonce.expose_secret();
    let raw = task::spawn_blocking(move || {
        let pem = String::from_utf8_lossy(&protected_key);
        let private = RsaPrivateKey::from_pkcs8_encrypted_pem(&pem, password)
            .map_err(CryptoError::PrivateKeyUnwrap)?;
        private
            .decrypt(Oaep::new::<Sha256>(), &wrapped)
            .map(SecretBytes::new)
            .map_err(CryptoError::PassphraseUnwrap)
    })
    .await??;

    Ok(Passphrase32::new(fixed::<PASSPHRASE_SIZE>(
        "passphrase",
        raw.expose_secret(),
    )?))
}
