use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Persisted settings record.
///
/// Serialized as camelCase JSON. Missing fields take their defaults on
/// load, so older files merge cleanly over new defaults; unknown fields
/// are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Whether the comments folder is currently in its visible form. Must
    /// match the on-disk form after any successful operation.
    pub show_comments: bool,
    /// Base folder name, without the hidden-prefix dot.
    pub hidden_folder_name: String,
    /// Prefix applied to newly created comment file names.
    pub comment_file_prefix: String,
    pub set_css_class: bool,
    pub hide_embed_titles: bool,
    /// Keep the folder visible while the host application is closed.
    pub show_on_quit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_comments: true,
            hidden_folder_name: "hiddenComments".to_string(),
            comment_file_prefix: "comment-".to_string(),
            set_css_class: true,
            hide_embed_titles: true,
            show_on_quit: false,
        }
    }
}

impl Settings {
    /// Folder name in its visible form.
    #[must_use]
    pub fn visible_folder(&self) -> String {
        self.hidden_folder_name.clone()
    }

    /// Folder name in its dot-prefixed hidden form.
    #[must_use]
    pub fn hidden_folder(&self) -> String {
        format!(".{}", self.hidden_folder_name)
    }

    /// Folder name in the form matching the persisted visibility.
    #[must_use]
    pub fn current_folder(&self) -> String {
        if self.show_comments {
            self.visible_folder()
        } else {
            self.hidden_folder()
        }
    }
}

/// On-disk settings record, written wholesale on every save.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, merging the persisted record over defaults. A missing
    /// file yields the defaults.
    pub async fn load(&self) -> Result<Settings> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Settings::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Write the whole record atomically (temp file, then rename).
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(settings)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
