use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("keyfile too small: {size} of {min} bytes")]
    FileTooSmall { size: u64, min: u64 },

    #[error("keyfile too large: {size} bytes ({max} max)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("failed to read keyfile {}", path.display())]
    Keyfile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read passphrase file {}", path.display())]
    PassphraseFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read passphrase from terminal")]
    Prompt(#[source] std::io::Error),

    #[error("passphrase mismatch")]
    PassphraseMismatch,

    #[error("invalid terminal: passphrase entry requires an interactive terminal")]
    Terminal,

    #[error("cipher initialization failed: {0}")]
    CipherInit(String),

    #[error("keystream too short: {needed} symbols needed, {actual} available")]
    ShortKeystream { needed: usize, actual: usize },
}

impl Error {
    /// True for the keyfile size-bound failures.
    pub fn is_input_size(&self) -> bool {
        matches!(self, Error::FileTooSmall { .. } | Error::FileTooLarge { .. })
    }
}
