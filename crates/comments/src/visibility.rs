use crate::config::{Settings, SettingsStore};
use crate::notify::Notifier;
use crate::relocate::rename_folder;
use crate::{CommentsError, Result};
use sidenote_vault::{Vault, VaultEntry};

/// Visibility of the comments folder, mirroring `Settings::show_comments`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        if settings.show_comments {
            Visibility::Shown
        } else {
            Visibility::Hidden
        }
    }
}

/// What startup reconciliation decided to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// The folder was left visible across a shutdown; rename it back to the
    /// hidden form, silently.
    ForceHide,
    /// Only the visible form exists; adopt `Shown` as the persisted state.
    AdoptShown,
    /// Only the hidden form exists; adopt `Hidden` as the persisted state.
    AdoptHidden,
    /// Both forms exist. Unrecoverable: which one is current cannot be
    /// inferred, so nothing is renamed or deleted.
    Halt,
    /// Neither form exists; create the folder in the persisted form.
    CreateFolder(Visibility),
}

/// Decide what startup must do to line the tree up with the persisted state.
///
/// Pure and deterministic: the same (persisted, visible_exists,
/// hidden_exists) triple always yields the same action.
#[must_use]
pub fn plan_reconciliation(
    persisted: Visibility,
    visible_exists: bool,
    hidden_exists: bool,
) -> ReconcileAction {
    if persisted == Visibility::Hidden && visible_exists && !hidden_exists {
        ReconcileAction::ForceHide
    } else if visible_exists && !hidden_exists {
        ReconcileAction::AdoptShown
    } else if hidden_exists && !visible_exists {
        ReconcileAction::AdoptHidden
    } else if hidden_exists && visible_exists {
        ReconcileAction::Halt
    } else {
        ReconcileAction::CreateFolder(persisted)
    }
}

/// What shutdown decided to do with the folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopAction {
    /// Rename to the visible form so the folder stays reachable while the
    /// host application is closed.
    Reveal,
    /// Leave the on-disk form as it is.
    Keep,
}

/// Shutdown counterpart of [`plan_reconciliation`]. The ambiguous
/// both-exist state is left untouched here too.
#[must_use]
pub fn plan_shutdown(show_on_quit: bool, visible_exists: bool, hidden_exists: bool) -> StopAction {
    if show_on_quit && !(visible_exists && hidden_exists) {
        StopAction::Reveal
    } else {
        StopAction::Keep
    }
}

/// Folder existence through the layer that can actually see the given form.
///
/// Dot-prefixed names are invisible to the standard lookup, so the hidden
/// form goes through the raw path check.
pub async fn folder_exists(vault: &dyn Vault, name: &str) -> Result<bool> {
    if name.starts_with('.') {
        Ok(vault.path_exists(name).await?)
    } else {
        Ok(matches!(vault.entry(name).await?, VaultEntry::Folder))
    }
}

/// Run startup reconciliation, persisting whatever it changes.
///
/// On-disk form is the source of truth for drift detection; the persisted
/// record is the source of truth for intent.
pub async fn reconcile_on_start(
    settings: &mut Settings,
    store: &SettingsStore,
    vault: &dyn Vault,
    notifier: &dyn Notifier,
) -> Result<ReconcileAction> {
    let visible = settings.visible_folder();
    let hidden = settings.hidden_folder();
    let visible_exists = folder_exists(vault, &visible).await?;
    let hidden_exists = folder_exists(vault, &hidden).await?;

    let action = plan_reconciliation(
        Visibility::from_settings(settings),
        visible_exists,
        hidden_exists,
    );
    log::debug!("startup reconciliation for '{visible}': {action:?}");

    match action {
        ReconcileAction::ForceHide => {
            rename_folder(vault, &visible, &hidden, true, notifier).await?;
        }
        ReconcileAction::AdoptShown => {
            settings.show_comments = true;
            store.save(settings).await?;
        }
        ReconcileAction::AdoptHidden => {
            settings.show_comments = false;
            store.save(settings).await?;
        }
        ReconcileAction::Halt => {
            notifier.notify("Both hidden and visible folders exist! Please delete one.");
            return Err(CommentsError::Drift(settings.hidden_folder_name.clone()));
        }
        ReconcileAction::CreateFolder(_) => {
            vault.create_folder(&settings.current_folder()).await?;
        }
    }
    Ok(action)
}

/// Make the comments folder visible.
///
/// Idempotent: when already shown nothing is persisted or renamed, and a
/// notice is emitted unless `silent`. The state is persisted before the
/// rename so a crash in between is repaired by the next startup.
pub async fn show(
    settings: &mut Settings,
    store: &SettingsStore,
    vault: &dyn Vault,
    notifier: &dyn Notifier,
    silent: bool,
) -> Result<()> {
    if settings.show_comments {
        if !silent {
            notifier.notify("Comments should already be visible!");
        }
        return Ok(());
    }
    settings.show_comments = true;
    store.save(settings).await?;
    rename_folder(
        vault,
        &settings.hidden_folder(),
        &settings.visible_folder(),
        silent,
        notifier,
    )
    .await?;
    Ok(())
}

/// Hide the comments folder. Mirror of [`show`].
pub async fn hide(
    settings: &mut Settings,
    store: &SettingsStore,
    vault: &dyn Vault,
    notifier: &dyn Notifier,
    silent: bool,
) -> Result<()> {
    if !settings.show_comments {
        if !silent {
            notifier.notify("Comments should already be hidden!");
        }
        return Ok(());
    }
    settings.show_comments = false;
    store.save(settings).await?;
    rename_folder(
        vault,
        &settings.visible_folder(),
        &settings.hidden_folder(),
        silent,
        notifier,
    )
    .await?;
    Ok(())
}

/// Shutdown path: optionally reveal the folder while the host application
/// is closed. The next startup re-hides it via `ReconcileAction::ForceHide`.
pub async fn on_stop(
    settings: &Settings,
    vault: &dyn Vault,
    notifier: &dyn Notifier,
) -> Result<StopAction> {
    let visible_exists = folder_exists(vault, &settings.visible_folder()).await?;
    let hidden_exists = folder_exists(vault, &settings.hidden_folder()).await?;
    let action = plan_shutdown(settings.show_on_quit, visible_exists, hidden_exists);
    if action == StopAction::Reveal {
        rename_folder(
            vault,
            &settings.hidden_folder(),
            &settings.visible_folder(),
            true,
            notifier,
        )
        .await?;
    }
    Ok(action)
}
