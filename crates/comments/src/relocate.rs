use crate::notify::Notifier;
use crate::Result;
use sidenote_vault::{Vault, VaultEntry};

/// How a folder rename was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Found through the standard lookup and renamed through the tree.
    Renamed,
    /// Invisible to the standard lookup (dot-prefixed); renamed through the
    /// raw path layer.
    RenamedRaw,
    /// Neither layer found the folder; surfaced as a notice unless silent.
    NotFound,
}

/// Rename the comments folder between its two on-disk forms.
///
/// The standard lookup cannot see dot-prefixed entries, so a folder in its
/// hidden form is located and renamed through the raw path layer instead.
/// A missing folder is non-fatal: the outcome says so and a notice is
/// emitted unless `silent`.
pub async fn rename_folder(
    vault: &dyn Vault,
    old_name: &str,
    new_name: &str,
    silent: bool,
    notifier: &dyn Notifier,
) -> Result<RenameOutcome> {
    match vault.entry(old_name).await? {
        VaultEntry::Folder => {
            vault.rename_entry(old_name, new_name).await?;
            log::debug!("renamed comments folder '{old_name}' -> '{new_name}'");
            Ok(RenameOutcome::Renamed)
        }
        VaultEntry::File | VaultEntry::Absent => {
            if vault.path_exists(old_name).await? {
                vault.rename_path(old_name, new_name).await?;
                log::debug!("raw-renamed comments folder '{old_name}' -> '{new_name}'");
                Ok(RenameOutcome::RenamedRaw)
            } else {
                if !silent {
                    notifier.notify("Comments folder couldn't be found!");
                }
                Ok(RenameOutcome::NotFound)
            }
        }
    }
}
