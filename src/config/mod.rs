// src/config/mod.rs
//! Configuration system for the vault
//!
//! TOML file + env overrides, resolved once by the caller and handed to
//! [`Vault::new`](crate::vault::Vault::new) explicitly.

pub use app::{load, Config, KeyParams, Paths};

mod app;
mod defaults;
