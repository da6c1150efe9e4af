// src/vault.rs
//! The vault facade — one encrypted record, rotated on every read
//!
//! ```ignore
//! let vault: Vault<Settings> = Vault::new(config::load()?)?;
//! vault.save(&settings).await?;
//! let settings = vault.load().await?; // key material is now brand new
//! ```

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::aliases::{CypherText, PlainText};
use crate::config::{Config, KeyParams};
use crate::crypto::EnvelopeCipher;
use crate::enums::SlotKind;
use crate::error::{ErrorCode, ErrorKind, Result, VaultError};
use crate::store::SlotStore;

/// Shape check over the decoded, still untyped payload
pub trait Validator: Send + Sync {
    fn validate(&self, value: &Value) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn validate(&self, value: &Value) -> bool {
        self(value)
    }
}

/// Accepts anything that deserializes
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn validate(&self, _: &Value) -> bool {
        true
    }
}

/// One entry of a `try_load` suppression list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppress {
    Kind(ErrorKind),
    Code(u16),
}

impl Suppress {
    pub fn matches(&self, err: &VaultError) -> bool {
        match self {
            Suppress::Kind(kind) => err.kind() == Some(*kind),
            Suppress::Code(code) => err.code().map(ErrorCode::as_u16) == Some(*code),
        }
    }
}

impl From<ErrorKind> for Suppress {
    fn from(kind: ErrorKind) -> Self {
        Suppress::Kind(kind)
    }
}

impl From<ErrorCode> for Suppress {
    fn from(code: ErrorCode) -> Self {
        Suppress::Code(code.as_u16())
    }
}

#[derive(Debug, Clone)]
pub struct TryLoadOptions<T> {
    pub suppress: Vec<Suppress>,
    /// Returned when a suppressed failure occurs
    pub default: Option<T>,
}

impl<T> Default for TryLoadOptions<T> {
    fn default() -> Self {
        TryLoadOptions {
            suppress: Vec::new(),
            default: None,
        }
    }
}

impl<T> TryLoadOptions<T> {
    pub fn suppress(mut self, entry: impl Into<Suppress>) -> Self {
        self.suppress.push(entry.into());
        self
    }

    pub fn or(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }
}

pub struct Vault<T, V = AcceptAll> {
    cipher: EnvelopeCipher,
    validator: V,
    _record: PhantomData<fn() -> T>,
}

impl<T> Vault<T, AcceptAll> {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_validator(config, AcceptAll)
    }
}

impl<T, V: Validator> Vault<T, V> {
    pub fn with_validator(config: Config, validator: V) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(
            SlotStore::new(config.paths),
            config.keys,
            validator,
        ))
    }

    /// Assemble from an already configured store (e.g. one with a custom id generator)
    pub fn from_parts(store: SlotStore, keys: KeyParams, validator: V) -> Self {
        Vault {
            cipher: EnvelopeCipher::new(store, keys),
            validator,
            _record: PhantomData,
        }
    }

    pub fn store(&self) -> &SlotStore {
        self.cipher.store()
    }
}

impl<T, V> Vault<T, V>
where
    T: Serialize + DeserializeOwned,
    V: Validator,
{
    /// Encrypt `value` under fresh key material, replacing the stored record.
    /// The validator is not consulted.
    pub async fn save(&self, value: &T) -> Result<()> {
        let plaintext = PlainText::new(serde_json::to_vec(value)?);
        let ciphertext = self.cipher.encrypt(&plaintext).await?;
        self.store()
            .save(SlotKind::Payload, ciphertext.expose_secret())
            .await?;
        info!("vault record saved");
        Ok(())
    }

    /// Consume the stored record, validate it and save it again under new keys.
    pub async fn load(&self) -> Result<T> {
        let ciphertext = CypherText::new(self.store().load(SlotKind::Payload).await?);
        let plaintext = self.cipher.decrypt(&ciphertext).await?;
        let raw: Value = serde_json::from_slice(plaintext.expose_secret())?;

        if !self.validator.validate(&raw) {
            warn!("loaded record rejected by validator");
            return Err(VaultError::InvalidData);
        }
        let value: T = serde_json::from_value(raw).map_err(|err| {
            warn!(%err, "loaded record does not match the expected type");
            VaultError::InvalidData
        })?;

        self.save(&value).await?;
        info!("vault record loaded, key material rotated");
        Ok(value)
    }

    /// `load`, but failures listed in `options.suppress` yield `options.default`.
    /// Anything else propagates untouched.
    pub async fn try_load(&self, options: TryLoadOptions<T>) -> Result<Option<T>> {
        match self.load().await {
            Ok(value) => Ok(Some(value)),
            Err(err) if options.suppress.iter().any(|s| s.matches(&err)) => {
                info!(%err, "load failure suppressed");
                Ok(options.default)
            }
            Err(err) => Err(err),
        }
    }
}
