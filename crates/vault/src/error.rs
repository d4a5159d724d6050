use thiserror::Error;

pub type Result<T> = std::result::Result<T, VaultError>;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("entry not found: {0}")]
    NotFound(String),

    #[error("path escapes the vault root: {0}")]
    OutsideRoot(String),

    #[error("{0}")]
    Other(String),
}
