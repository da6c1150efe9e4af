// src/store/naming.rs
//! Unique slot suffixes
//!
//! Injected into [`SlotStore`](super::SlotStore) so tests can pin names.

use std::path::is_separator;

use rand::RngCore;

use crate::consts::SLOT_ID_BYTES;
use crate::error::{Result, VaultError};

/// Produces the unique suffix appended to a kind's prefix
pub trait SlotIdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// 16 bytes from the thread-local CSPRNG, lowercase hex
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomHexIds;

impl SlotIdGenerator for RandomHexIds {
    fn next_id(&self) -> String {
        let mut bytes = [0u8; SLOT_ID_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

impl<F> SlotIdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_id(&self) -> String {
        self()
    }
}

/// Next id from `ids`, refused unless it stays a single file-name component
pub(crate) fn checked_id(ids: &dyn SlotIdGenerator) -> Result<String> {
    let id = ids.next_id();
    if id.is_empty() || id == "." || id == ".." || id.chars().any(is_separator) {
        return Err(VaultError::InvalidSlotId(id));
    }
    Ok(id)
}
