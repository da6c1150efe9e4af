// src/config/app.rs
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::defaults::*;
use crate::consts::{ENV_CONFIG, ENV_KEY_ROOT, ENV_STORAGE_ROOT, MIN_RSA_BITS, SCRYPT_LOG_N_RANGE};
use crate::error::{Result, VaultError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_paths")]
    pub paths: Paths,
    #[serde(default = "default_keys")]
    pub keys: KeyParams,
}

/// Where slots live. Payload slots go under `storage_root`, all key
/// material under `key_root`. The two may be the same directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Paths {
    pub storage_root: PathBuf,
    pub key_root: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct KeyParams {
    #[serde(default = "default_rsa_bits")]
    pub rsa_bits: usize,
    #[serde(default = "default_scrypt_log_n")]
    pub scrypt_log_n: u8,
}

fn default_rsa_bits() -> usize {
    default_keys().rsa_bits
}

fn default_scrypt_log_n() -> u8 {
    default_keys().scrypt_log_n
}

impl Default for Config {
    fn default() -> Self {
        Config {
            paths: default_paths(),
            keys: default_keys(),
        }
    }
}

impl Config {
    /// Default key parameters rooted at explicit directories
    pub fn with_roots(storage_root: impl Into<PathBuf>, key_root: impl Into<PathBuf>) -> Self {
        Config {
            paths: Paths {
                storage_root: storage_root.into(),
                key_root: key_root.into(),
            },
            keys: default_keys(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let conf: Config = toml::from_str(content)?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.keys.rsa_bits < MIN_RSA_BITS {
            return Err(VaultError::InvalidConfig(format!(
                "rsa_bits must be at least {MIN_RSA_BITS}, got {}",
                self.keys.rsa_bits
            )));
        }
        if !SCRYPT_LOG_N_RANGE.contains(&self.keys.scrypt_log_n) {
            return Err(VaultError::InvalidConfig(format!(
                "scrypt_log_n must be within {}..={}, got {}",
                SCRYPT_LOG_N_RANGE.start(),
                SCRYPT_LOG_N_RANGE.end(),
                self.keys.scrypt_log_n
            )));
        }
        Ok(())
    }
}

/// Resolve the config at startup — falls back to defaults if no file is configured
pub fn load() -> Result<Config> {
    let mut conf = match std::env::var_os(ENV_CONFIG) {
        Some(path) if Path::new(&path).exists() => {
            debug!(path = %Path::new(&path).display(), "loading vault config");
            Config::from_file(&path)?
        }
        Some(path) => {
            warn!(path = %Path::new(&path).display(), "config file not found — using built-in defaults");
            Config::default()
        }
        None => Config::default(),
    };

    if let Some(root) = std::env::var_os(ENV_STORAGE_ROOT) {
        conf.paths.storage_root = PathBuf::from(root);
    }
    if let Some(root) = std::env::var_os(ENV_KEY_ROOT) {
        conf.paths.key_root = PathBuf::from(root);
    }

    conf.validate()?;
    Ok(conf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_RSA_BITS, DEFAULT_SCRYPT_LOG_N};

    #[test]
    fn parses_full_config() {
        let conf = Config::from_toml_str(
            r#"
            [paths]
            storage_root = "/tmp/vault/data"
            key_root = "/tmp/vault/keys"

            [keys]
            rsa_bits = 3072
            scrypt_log_n = 12
            "#,
        )
        .unwrap();
        assert_eq!(conf.paths.storage_root, PathBuf::from("/tmp/vault/data"));
        assert_eq!(conf.paths.key_root, PathBuf::from("/tmp/vault/keys"));
        assert_eq!(conf.keys.rsa_bits, 3072);
        assert_eq!(conf.keys.scrypt_log_n, 12);
    }

    #[test]
    fn missing_key_section_uses_defaults() {
        let conf = Config::from_toml_str(
            r#"
            [paths]
            storage_root = "a"
            key_root = "b"
            "#,
        )
        .unwrap();
        assert_eq!(conf.keys.rsa_bits, DEFAULT_RSA_BITS);
        assert_eq!(conf.keys.scrypt_log_n, DEFAULT_SCRYPT_LOG_N);
    }

    #[test]
    fn rejects_weak_rsa() {
        let err = Config::from_toml_str(
            r#"
            [keys]
            rsa_bits = 1024
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, VaultError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_out_of_range_scrypt_cost() {
        let mut conf = Config::with_roots("a", "b");
        conf.keys.scrypt_log_n = 30;
        assert!(matches!(conf.validate(), Err(VaultError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = Config::from_toml_str("[paths\nstorage_root = ").unwrap_err();
        assert!(matches!(err, VaultError::Config(_)));
    }
}
