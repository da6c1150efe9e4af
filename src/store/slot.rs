// src/store/slot.rs
//! Single-active-slot storage
//!
//! A slot is a file named `<prefix><id>` in its kind's directory. The store
//! keeps the count of matching files per kind at 0 or 1; anything else is
//! reported as [`VaultError::Ambiguous`] and left for a human to resolve.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use super::naming::{checked_id, RandomHexIds, SlotIdGenerator};
use crate::config::Paths;
use crate::consts::{PENDING_PREFIX, TRASH_PREFIX};
use crate::enums::{SlotKind, SlotRoot};
use crate::error::{Result, VaultError};

#[derive(Clone)]
pub struct SlotStore {
    paths: Paths,
    ids: Arc<dyn SlotIdGenerator>,
}

impl std::fmt::Debug for SlotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotStore")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl SlotStore {
    pub fn new(paths: Paths) -> Self {
        Self::with_id_generator(paths, RandomHexIds)
    }

    pub fn with_id_generator(paths: Paths, ids: impl SlotIdGenerator + 'static) -> Self {
        SlotStore {
            paths,
            ids: Arc::new(ids),
        }
    }

    /// Directory holding slots of `kind`
    pub fn dir(&self, kind: SlotKind) -> &Path {
        match kind.root() {
            SlotRoot::Storage => &self.paths.storage_root,
            SlotRoot::Keys => &self.paths.key_root,
        }
    }

    /// All files currently matching `kind`, sorted by path.
    ///
    /// A missing directory is the same as an empty one. Symlinks count when
    /// they point at a regular file; directories and dangling links don't.
    pub async fn detect(&self, kind: SlotKind) -> Result<Vec<PathBuf>> {
        let dir = self.dir(kind);
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if !name.to_string_lossy().contains(kind.prefix()) {
                continue;
            }
            let path = entry.path();
            match fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => found.push(path),
                Ok(_) => {}
                Err(err) if err.kind() == IoErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        found.sort();
        Ok(found)
    }

    /// Replace whatever is stored for `kind` with `bytes`.
    ///
    /// The new content is staged under a hidden name first, so a failed
    /// write leaves the previous slot untouched. Old slots are removed
    /// before the new one becomes visible. Staging and trash files left
    /// over from an interrupted save or load are swept first.
    pub async fn save(&self, kind: SlotKind, bytes: &[u8]) -> Result<PathBuf> {
        let dir = self.dir(kind);
        let id = checked_id(self.ids.as_ref())?;
        let target = dir.join(format!("{}{id}", kind.prefix()));
        let pending = dir.join(format!("{PENDING_PREFIX}{id}"));

        fs::create_dir_all(dir).await?;
        sweep_leftovers(dir).await?;

        let staged = match write_synced(&pending, bytes).await {
            Ok(()) => self.replace(kind, &pending, &target).await,
            Err(err) => Err(err),
        };
        if let Err(err) = staged {
            discard(&pending).await;
            return Err(err);
        }

        debug!(%kind, slot = %target.display(), len = bytes.len(), "slot saved");
        Ok(target)
    }

    async fn replace(&self, kind: SlotKind, pending: &Path, target: &Path) -> Result<()> {
        for stale in self.detect(kind).await? {
            remove_if_present(&stale).await?;
        }
        fs::rename(pending, target).await?;
        Ok(())
    }

    /// Read the single slot of `kind` and consume it.
    ///
    /// The slot leaves the namespace through one rename, so a caller never
    /// observes a slot that was read but not removed.
    pub async fn load(&self, kind: SlotKind) -> Result<Vec<u8>> {
        let mut matches = self.detect(kind).await?;
        let path = match matches.len() {
            0 => return Err(VaultError::NotFound { kind }),
            1 => matches.remove(0),
            count => {
                warn!(%kind, count, "multiple slots detected");
                return Err(VaultError::Ambiguous { kind, count });
            }
        };

        let bytes = fs::read(&path).await?;

        let trash = self
            .dir(kind)
            .join(format!("{TRASH_PREFIX}{}", checked_id(self.ids.as_ref())?));
        fs::rename(&path, &trash).await?;
        discard(&trash).await;

        debug!(%kind, slot = %path.display(), len = bytes.len(), "slot consumed");
        Ok(bytes)
    }
}

/// Remove `.pending-*` / `.trash-*` files; none is live while a save starts
async fn sweep_leftovers(dir: &Path) -> Result<()> {
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !(name.starts_with(PENDING_PREFIX) || name.starts_with(TRASH_PREFIX)) {
            continue;
        }
        if entry.file_type().await?.is_file() {
            debug!(file = %entry.path().display(), "sweeping leftover");
            remove_if_present(&entry.path()).await?;
        }
    }
    Ok(())
}

async fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

async fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Err(err) if err.kind() != IoErrorKind::NotFound => Err(err.into()),
        _ => Ok(()),
    }
}

/// Best-effort cleanup of a file that is already outside the slot namespace
async fn discard(path: &Path) {
    if let Err(err) = remove_if_present(path).await {
        warn!(file = %path.display(), %err, "failed to remove leftover file");
    }
}
