use crate::{Result, Vault, VaultEntry, VaultError};
use async_trait::async_trait;
use ignore::WalkBuilder;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Filesystem-backed vault rooted at a directory.
///
/// The standard layer mirrors host trees whose listings and lookups skip
/// dot-prefixed entries; the raw layer operates on bare paths and sees
/// everything under the root.
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a vault-relative path, rejecting anything that could escape
    /// the root.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let rel = Path::new(path);
        if rel.as_os_str().is_empty() || rel.is_absolute() {
            return Err(VaultError::OutsideRoot(path.to_string()));
        }
        for component in rel.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => return Err(VaultError::OutsideRoot(path.to_string())),
            }
        }
        Ok(self.root.join(rel))
    }

    fn is_hidden(path: &str) -> bool {
        Path::new(path).components().any(|component| match component {
            Component::Normal(name) => name.to_string_lossy().starts_with('.'),
            _ => false,
        })
    }
}

#[async_trait]
impl Vault for FsVault {
    async fn list_documents(&self) -> Result<Vec<String>> {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || {
            let mut names = Vec::new();
            let mut builder = WalkBuilder::new(&root);
            builder
                .hidden(true) // the standard listing never surfaces dot entries
                .git_ignore(false)
                .git_global(false)
                .git_exclude(false);

            for entry in builder.build() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        log::warn!("Failed to read entry: {err}");
                        continue;
                    }
                };
                if !entry.file_type().is_some_and(|t| t.is_file()) {
                    continue;
                }
                let path = entry.path();
                let is_markdown = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
                if !is_markdown {
                    continue;
                }
                if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                    names.push(name.to_string());
                }
            }

            names.sort();
            Ok::<_, VaultError>(names)
        })
        .await
        .map_err(|err| VaultError::Other(format!("join listing task: {err}")))?
    }

    async fn entry(&self, path: &str) -> Result<VaultEntry> {
        if Self::is_hidden(path) {
            return Ok(VaultEntry::Absent);
        }
        let full = self.resolve(path)?;
        match fs::metadata(&full).await {
            Ok(meta) if meta.is_dir() => Ok(VaultEntry::Folder),
            Ok(_) => Ok(VaultEntry::File),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(VaultEntry::Absent),
            Err(err) => Err(err.into()),
        }
    }

    async fn create_folder(&self, path: &str) -> Result<()> {
        let full = self.resolve(path)?;
        fs::create_dir_all(&full).await?;
        Ok(())
    }

    async fn create_file(&self, path: &str, contents: &str) -> Result<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&full, contents).await?;
        Ok(())
    }

    async fn read_file(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        match fs::read_to_string(&full).await {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(VaultError::NotFound(path.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn rename_entry(&self, old: &str, new: &str) -> Result<()> {
        match self.entry(old).await? {
            VaultEntry::Absent => Err(VaultError::NotFound(old.to_string())),
            VaultEntry::File | VaultEntry::Folder => {
                let from = self.resolve(old)?;
                let to = self.resolve(new)?;
                fs::rename(&from, &to).await?;
                Ok(())
            }
        }
    }

    async fn path_exists(&self, path: &str) -> Result<bool> {
        let full = self.resolve(path)?;
        match fs::metadata(&full).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn rename_path(&self, old: &str, new: &str) -> Result<()> {
        let from = self.resolve(old)?;
        let to = self.resolve(new)?;
        fs::rename(&from, &to).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[tokio::test]
    async fn lists_markdown_documents_sorted_by_name() {
        let temp = tempdir().expect("tempdir");
        std::fs::create_dir_all(temp.path().join("sub")).expect("create sub");
        std::fs::write(temp.path().join("beta.md"), "b").expect("write");
        std::fs::write(temp.path().join("sub").join("alpha.md"), "a").expect("write");
        std::fs::write(temp.path().join("notes.txt"), "skip").expect("write");

        let vault = FsVault::new(temp.path());
        let names = vault.list_documents().await.expect("list");

        assert_eq!(names, vec!["alpha.md".to_string(), "beta.md".to_string()]);
    }

    #[tokio::test]
    async fn listing_and_lookup_skip_hidden_entries() {
        let temp = tempdir().expect("tempdir");
        let hidden = temp.path().join(".hiddenComments");
        std::fs::create_dir_all(&hidden).expect("create hidden");
        std::fs::write(hidden.join("comment-1-note.md"), "secret").expect("write");

        let vault = FsVault::new(temp.path());

        assert_eq!(vault.list_documents().await.expect("list"), Vec::<String>::new());
        assert_eq!(
            vault.entry(".hiddenComments").await.expect("entry"),
            VaultEntry::Absent
        );
        assert!(vault.path_exists(".hiddenComments").await.expect("exists"));
    }

    #[tokio::test]
    async fn entry_distinguishes_files_and_folders() {
        let temp = tempdir().expect("tempdir");
        std::fs::create_dir_all(temp.path().join("folder")).expect("create");
        std::fs::write(temp.path().join("note.md"), "hi").expect("write");

        let vault = FsVault::new(temp.path());

        assert_eq!(vault.entry("folder").await.expect("entry"), VaultEntry::Folder);
        assert_eq!(vault.entry("note.md").await.expect("entry"), VaultEntry::File);
        assert_eq!(vault.entry("missing").await.expect("entry"), VaultEntry::Absent);
    }

    #[tokio::test]
    async fn rename_entry_refuses_what_it_cannot_see() {
        let temp = tempdir().expect("tempdir");
        std::fs::create_dir_all(temp.path().join(".hidden")).expect("create");

        let vault = FsVault::new(temp.path());
        let err = vault.rename_entry(".hidden", "visible").await.unwrap_err();
        assert!(matches!(err, VaultError::NotFound(_)));

        // The raw layer can.
        vault.rename_path(".hidden", "visible").await.expect("raw rename");
        assert_eq!(vault.entry("visible").await.expect("entry"), VaultEntry::Folder);
        assert!(!vault.path_exists(".hidden").await.expect("exists"));
    }

    #[tokio::test]
    async fn rejects_paths_escaping_the_root() {
        let temp = tempdir().expect("tempdir");
        let vault = FsVault::new(temp.path());

        assert!(matches!(
            vault.path_exists("../outside").await.unwrap_err(),
            VaultError::OutsideRoot(_)
        ));
        assert!(matches!(
            vault.entry("/etc").await.unwrap_err(),
            VaultError::OutsideRoot(_)
        ));
    }

    #[tokio::test]
    async fn create_file_makes_parent_folders() {
        let temp = tempdir().expect("tempdir");
        let vault = FsVault::new(temp.path());

        vault
            .create_file("hiddenComments/comment-1-note.md", "body")
            .await
            .expect("create");

        let contents = vault
            .read_file("hiddenComments/comment-1-note.md")
            .await
            .expect("read");
        assert_eq!(contents, "body");
    }
}
