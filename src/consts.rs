// src/consts.rs
//! Shared constants — security parameters and storage layout

/// AES-256 requires a 256 bit key. 256 bits === 32 bytes
pub const PASSPHRASE_SIZE: usize = 32;

/// Nonce doubles as the GCM IV, so it is sized like the key
pub const NONCE_SIZE: usize = 32;

/// GCM authentication tag length
pub const AUTH_TAG_SIZE: usize = 16;

/// Default RSA modulus for wrapping the passphrase
pub const DEFAULT_RSA_BITS: usize = 4096;

/// Anything below this is refused by config validation
pub const MIN_RSA_BITS: usize = 2048;

/// scrypt N = 2^14, r = 8, p = 1
pub const DEFAULT_SCRYPT_LOG_N: u8 = 14;
pub const SCRYPT_R: u32 = 8;
pub const SCRYPT_P: u32 = 1;

/// Accepted range for `scrypt_log_n`
pub const SCRYPT_LOG_N_RANGE: std::ops::RangeInclusive<u8> = 10..=20;

/// Random bytes in a generated slot suffix (rendered as hex)
pub const SLOT_ID_BYTES: usize = 16;

/// Default directory names under the home directory
pub const DEFAULT_STORAGE_DIR: &str = ".tcss";
pub const DEFAULT_KEY_DIR: &str = ".tcpk";

/// Hidden prefixes used while a slot is being written or taken.
/// Neither contains any slot prefix.
pub const PENDING_PREFIX: &str = ".pending-";
pub const TRASH_PREFIX: &str = ".trash-";

/// Environment variables
pub const ENV_CONFIG: &str = "REV_CONFIG";
pub const ENV_STORAGE_ROOT: &str = "REV_STORAGE_ROOT";
pub const ENV_KEY_ROOT: &str = "REV_KEY_ROOT";
