// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{KeyParams, Paths};
use crate::consts::{DEFAULT_KEY_DIR, DEFAULT_RSA_BITS, DEFAULT_SCRYPT_LOG_N, DEFAULT_STORAGE_DIR};

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_paths() -> Paths {
    let home = home();
    Paths {
        storage_root: home.join(DEFAULT_STORAGE_DIR),
        key_root: home.join(DEFAULT_KEY_DIR),
    }
}

pub fn default_keys() -> KeyParams {
    KeyParams {
        rsa_bits: DEFAULT_RSA_BITS,
        scrypt_log_n: DEFAULT_SCRYPT_LOG_N,
    }
}
