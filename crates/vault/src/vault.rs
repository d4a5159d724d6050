use crate::Result;
use async_trait::async_trait;

/// What the standard lookup found at a path.
///
/// Dot-prefixed paths are `Absent` through this lookup even when something
/// exists on disk; only the raw layer can see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultEntry {
    File,
    Folder,
    Absent,
}

/// Storage backend for a tree of markdown documents.
///
/// All paths are relative to the vault root, `/`-separated.
#[async_trait]
pub trait Vault: Send + Sync {
    /// Ordered names of the markdown documents in the tree. Hidden entries
    /// are excluded, like any standard listing.
    async fn list_documents(&self) -> Result<Vec<String>>;

    /// Typed lookup through the standard layer.
    async fn entry(&self, path: &str) -> Result<VaultEntry>;

    async fn create_folder(&self, path: &str) -> Result<()>;

    async fn create_file(&self, path: &str, contents: &str) -> Result<()>;

    async fn read_file(&self, path: &str) -> Result<String>;

    /// Rename an entry the standard lookup can see.
    async fn rename_entry(&self, old: &str, new: &str) -> Result<()>;

    /// Raw existence check; sees dot-prefixed paths.
    async fn path_exists(&self, path: &str) -> Result<bool>;

    /// Raw rename; sees dot-prefixed paths.
    async fn rename_path(&self, old: &str, new: &str) -> Result<()>;
}
