//! # Sidenote Vault
//!
//! Document-tree abstraction for the sidenote workspace.
//!
//! A [`Vault`] is a tree of markdown documents with two access layers: the
//! standard layer (listing, typed lookup, tree mutation) never sees
//! dot-prefixed entries, while the raw path layer (`path_exists`,
//! `rename_path`) sees everything on disk. Comment folders move between a
//! visible and a dot-hidden name, so callers need both layers.
//!
//! [`FsVault`] is the filesystem implementation, rooted at a directory.

mod error;
mod fs_vault;
mod vault;

pub use error::{Result, VaultError};
pub use fs_vault::FsVault;
pub use vault::{Vault, VaultEntry};
