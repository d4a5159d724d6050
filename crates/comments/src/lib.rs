//! # Sidenote Comments
//!
//! Hidden side-channel of annotation files for a tree of markdown
//! documents. Comments live in a companion folder whose visibility is
//! toggled by renaming it between `<name>` and `.<name>`, and each comment
//! file is embedded by reference into its host document.
//!
//! ## Flow
//!
//! ```text
//! startup ──> reconcile persisted state with the on-disk folder form
//!     │
//!     ├──> show()/hide() ── persist the new state, then rename the folder
//!     │
//!     └──> new comment ── unique name + preamble, marker into the host
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use sidenote_comments::{LogNotifier, Session, SettingsStore};
//! use sidenote_vault::FsVault;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let vault = Arc::new(FsVault::new("/path/to/vault"));
//!     let store = SettingsStore::new("/path/to/vault/.sidenote/settings.json");
//!     let (mut session, action) = Session::start(store, vault, Arc::new(LogNotifier)).await?;
//!     println!("reconciled on startup: {action:?}");
//!
//!     session.hide(false).await?;
//!     Ok(())
//! }
//! ```

mod annotation;
mod commands;
mod config;
mod editor;
mod error;
mod naming;
mod notify;
mod relocate;
mod visibility;

pub mod test_support;

pub use annotation::{
    apply_embed_suppression, comment_preamble, embed_marker, plan_embed_suppression, MetadataEdit,
    COMMENTS_HEADING, SUPPRESSION_KEY, SUPPRESSION_VALUE,
};
pub use commands::{command_enabled, surface, Command, Session};
pub use config::{Settings, SettingsStore};
pub use editor::{Editor, Position};
pub use error::{CommentsError, Result};
pub use naming::{next_comment_name, MAX_COMMENT_SEQUENCE};
pub use notify::{LogNotifier, Notifier};
pub use relocate::{rename_folder, RenameOutcome};
pub use visibility::{
    folder_exists, on_stop, plan_reconciliation, plan_shutdown, reconcile_on_start,
    ReconcileAction, StopAction, Visibility,
};
