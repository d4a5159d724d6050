use crate::annotation::{self, plan_embed_suppression, MetadataEdit};
use crate::config::{Settings, SettingsStore};
use crate::editor::{Editor, Position};
use crate::naming::next_comment_name;
use crate::notify::Notifier;
use crate::relocate::rename_folder;
use crate::visibility::{self, ReconcileAction, StopAction};
use crate::Result;
use sidenote_vault::Vault;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// User-facing commands, offered or withheld by the current visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ShowComments,
    HideComments,
    HideSelectionInComment,
    CreateNewComment,
    UnloadSelf,
}

/// Whether a command is offered in the current state: "show" only while
/// hidden, the editor commands only while shown.
#[must_use]
pub fn command_enabled(command: Command, settings: &Settings) -> bool {
    match command {
        Command::ShowComments => !settings.show_comments,
        Command::HideComments | Command::HideSelectionInComment | Command::CreateNewComment => {
            settings.show_comments
        }
        Command::UnloadSelf => true,
    }
}

/// Convert a command result into a notice, the way the host surfaces
/// failures. Errors never propagate past this boundary.
pub fn surface<T>(notifier: &dyn Notifier, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            notifier.notify(&err.user_message());
            None
        }
    }
}

/// Command boundary: owns the settings and collaborators and exposes the
/// operations the host wires to its commands and settings surface.
pub struct Session {
    settings: Settings,
    store: SettingsStore,
    vault: Arc<dyn Vault>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("settings", &self.settings)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Load settings and reconcile the on-disk folder form with them.
    ///
    /// `Err(Drift)` means both folder forms exist; the component must not
    /// accept further commands until an operator resolves it.
    pub async fn start(
        store: SettingsStore,
        vault: Arc<dyn Vault>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<(Self, ReconcileAction)> {
        let mut settings = store.load().await?;
        let action = visibility::reconcile_on_start(
            &mut settings,
            &store,
            vault.as_ref(),
            notifier.as_ref(),
        )
        .await?;
        Ok((
            Self {
                settings,
                store,
                vault,
                notifier,
            },
            action,
        ))
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn command_enabled(&self, command: Command) -> bool {
        command_enabled(command, &self.settings)
    }

    pub async fn show(&mut self, silent: bool) -> Result<()> {
        visibility::show(
            &mut self.settings,
            &self.store,
            self.vault.as_ref(),
            self.notifier.as_ref(),
            silent,
        )
        .await
    }

    pub async fn hide(&mut self, silent: bool) -> Result<()> {
        visibility::hide(
            &mut self.settings,
            &self.store,
            self.vault.as_ref(),
            self.notifier.as_ref(),
            silent,
        )
        .await
    }

    /// Settings-surface visibility toggle.
    pub async fn toggle_visibility(&mut self, visible: bool) -> Result<()> {
        if visible {
            self.show(false).await
        } else {
            self.hide(false).await
        }
    }

    /// Move the current selection into a fresh annotation file and embed it
    /// by reference in its place. Returns the created file name.
    pub async fn hide_selection_in_comment(
        &mut self,
        host_path: &str,
        editor: &mut dyn Editor,
    ) -> Result<String> {
        let selection = editor.selection();
        let name = self.create_comment_file(host_path, &selection).await?;
        editor.replace_selection(&annotation::embed_marker(&name));
        self.mark_host(host_path, editor).await;
        Ok(name)
    }

    /// Create an empty annotation and embed it at the cursor, leaving the
    /// cursor just past the inserted marker.
    pub async fn create_new_comment(
        &mut self,
        host_path: &str,
        editor: &mut dyn Editor,
    ) -> Result<String> {
        let name = self.create_comment_file(host_path, "").await?;
        let marker = annotation::embed_marker(&name);
        let cursor = editor.cursor();
        editor.replace_range(&marker, cursor, None);
        editor.set_cursor(Position::new(
            cursor.line,
            cursor.column + marker.chars().count(),
        ));
        self.mark_host(host_path, editor).await;
        Ok(name)
    }

    /// Change the folder base name; the current on-disk form is renamed
    /// first, then the settings are persisted. Deliberately does not
    /// re-check both forms before renaming; the next startup reconciliation
    /// repairs or reports whatever results.
    pub async fn set_folder_name(&mut self, new_name: &str) -> Result<()> {
        let prefix = if self.settings.show_comments { "" } else { "." };
        let old = format!("{prefix}{}", self.settings.hidden_folder_name);
        let new = format!("{prefix}{new_name}");
        rename_folder(
            self.vault.as_ref(),
            &old,
            &new,
            false,
            self.notifier.as_ref(),
        )
        .await?;
        self.settings.hidden_folder_name = new_name.to_string();
        self.store.save(&self.settings).await
    }

    pub async fn set_comment_prefix(&mut self, prefix: &str) -> Result<()> {
        self.settings.comment_file_prefix = prefix.to_string();
        self.store.save(&self.settings).await
    }

    pub async fn set_css_class(&mut self, value: bool) -> Result<()> {
        self.settings.set_css_class = value;
        self.store.save(&self.settings).await
    }

    pub async fn set_hide_embed_titles(&mut self, value: bool) -> Result<()> {
        self.settings.hide_embed_titles = value;
        self.store.save(&self.settings).await
    }

    pub async fn set_show_on_quit(&mut self, value: bool) -> Result<()> {
        self.settings.show_on_quit = value;
        self.store.save(&self.settings).await
    }

    /// Shutdown path: optionally leave the folder visible while the host
    /// application is closed.
    pub async fn stop(self) -> Result<StopAction> {
        log::info!("unloading comments session");
        visibility::on_stop(&self.settings, self.vault.as_ref(), self.notifier.as_ref()).await
    }

    async fn create_comment_file(&self, host_path: &str, body: &str) -> Result<String> {
        let host_name = file_name(host_path);
        let existing: HashSet<String> = self.vault.list_documents().await?.into_iter().collect();
        let name = next_comment_name(&host_name, &self.settings.comment_file_prefix, &existing)?;
        let contents = format!(
            "{}{}",
            annotation::comment_preamble(&host_name, &self.settings),
            body
        );
        // Editor commands are only offered while shown, so the file lands in
        // the visible form.
        let path = format!("{}/{}", self.settings.hidden_folder_name, name);
        self.vault.create_file(&path, &contents).await?;
        Ok(name)
    }

    /// Mark the host so embedded titles stay suppressed. Failures surface as
    /// a notice; the annotation itself is already in place.
    async fn mark_host(&self, host_path: &str, editor: &mut dyn Editor) {
        if !(self.settings.set_css_class && self.settings.hide_embed_titles) {
            return;
        }
        match self.plan_host_mark(host_path).await {
            Ok(Some(edit)) => annotation::apply_embed_suppression(editor, &edit),
            Ok(None) => {}
            Err(err) => self.notifier.notify(&err.user_message()),
        }
    }

    async fn plan_host_mark(&self, host_path: &str) -> Result<Option<MetadataEdit>> {
        let contents = self.vault.read_file(host_path).await?;
        plan_embed_suppression(&contents)
    }
}

fn file_name(host_path: &str) -> String {
    Path::new(host_path)
        .file_name()
        .map_or_else(|| host_path.to_string(), |n| n.to_string_lossy().into_owned())
}
