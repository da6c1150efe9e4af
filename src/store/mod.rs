// src/store/mod.rs
//! Filesystem-backed slot store
//!
//! Each [`SlotKind`](crate::enums::SlotKind) owns at most one live slot on
//! disk. `save` replaces it, `take` reads and consumes it.

mod naming;
mod slot;

pub use naming::{RandomHexIds, SlotIdGenerator};
pub use slot::SlotStore;
