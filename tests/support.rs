// tests/support.rs
//! Test utilities — isolated vault roots inside a temp dir

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rotating_envelope_vault::config::{Config, KeyParams, Paths};
use rotating_envelope_vault::crypto::EnvelopeCipher;
use rotating_envelope_vault::{SlotKind, SlotStore, Validator, Vault};
use tempfile::TempDir;

/// Cheap key parameters so tests don't spend minutes in RSA-4096 generation
pub const FAST_KEYS: KeyParams = KeyParams {
    rsa_bits: 2048,
    scrypt_log_n: 10,
};

#[allow(dead_code)] // Not every test binary uses every helper
pub struct TestRoots {
    dir: TempDir,
    pub config: Config,
}

#[allow(dead_code)]
impl TestRoots {
    /// Separate `storage/` and `keys/` roots, neither created yet
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = Config {
            paths: Paths {
                storage_root: dir.path().join("storage"),
                key_root: dir.path().join("keys"),
            },
            keys: FAST_KEYS,
        };
        Self { dir, config }
    }

    /// Payload and key material in one directory
    pub fn shared() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().join("vault");
        let config = Config {
            paths: Paths {
                storage_root: root.clone(),
                key_root: root,
            },
            keys: FAST_KEYS,
        };
        Self { dir, config }
    }

    pub fn base(&self) -> &Path {
        self.dir.path()
    }

    pub fn storage_root(&self) -> &PathBuf {
        &self.config.paths.storage_root
    }

    pub fn key_root(&self) -> &PathBuf {
        &self.config.paths.key_root
    }

    pub fn store(&self) -> SlotStore {
        SlotStore::new(self.config.paths.clone())
    }

    pub fn cipher(&self) -> EnvelopeCipher {
        EnvelopeCipher::new(self.store(), self.config.keys)
    }

    pub fn vault<T>(&self) -> Vault<T> {
        Vault::new(self.config.clone()).expect("valid test config")
    }

    pub fn vault_with<T, V: Validator>(&self, validator: V) -> Vault<T, V> {
        Vault::with_validator(self.config.clone(), validator).expect("valid test config")
    }

    /// File names of every live slot of the given kinds
    pub async fn slot_names(&self, kinds: &[SlotKind]) -> BTreeSet<String> {
        let store = self.store();
        let mut names = BTreeSet::new();
        for kind in kinds {
            for path in store.detect(*kind).await.expect("detect slots") {
                names.insert(path.file_name().unwrap().to_string_lossy().into_owned());
            }
        }
        names
    }

    /// Every entry in a directory, including hidden staging files
    pub fn dir_entries(&self, dir: &Path) -> BTreeSet<String> {
        std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for TestRoots {
    fn default() -> Self {
        Self::new()
    }
}
