use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommentsError>;

#[derive(Error, Debug)]
pub enum CommentsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("vault error: {0}")]
    Vault(#[from] sidenote_vault::VaultError),

    #[error("settings error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("both hidden and visible forms of '{0}' exist")]
    Drift(String),

    #[error("comments folder '{0}' not found")]
    FolderNotFound(String),

    #[error("no free comment name for '{host}' within {bound} candidates")]
    NamingExhausted { host: String, bound: u32 },

    #[error("host file already sets a conflicting '{0}' property")]
    ConflictingMetadata(String),
}

impl CommentsError {
    /// User-facing text for the notice surface.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CommentsError::Drift(_) => {
                "Both hidden and visible folders exist! Please delete one.".to_string()
            }
            CommentsError::FolderNotFound(_) => "Comments folder couldn't be found!".to_string(),
            CommentsError::NamingExhausted { .. } => {
                "Couldn't find a free comment file name!".to_string()
            }
            CommentsError::ConflictingMetadata(_) => "Couldn't set cssclass!".to_string(),
            other => format!("Comment operation failed: {other}"),
        }
    }
}
