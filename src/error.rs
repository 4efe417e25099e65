use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WadError>;

#[derive(Error, Debug)]
pub enum WadError {
    /// The source could not be opened for reading.
    #[error("cannot open {} for reading: {source}", path.display())]
    NotFound {
        path:   PathBuf,
        source: io::Error,
    },
    /// The destination could not be opened for writing.
    #[error("cannot open {} for writing: {source}", path.display())]
    WriteFailure {
        path:   PathBuf,
        source: io::Error,
    },
    /// Header or directory points outside the stream, or carries negative counts.
    #[error("Corrupt archive: {0}")]
    Corrupt(String),
    #[error("Invalid lump name: {0}")]
    InvalidName(String),
    /// A combined layout no longer fits the 32-bit signed header fields.
    #[error("Archive too large: {0}")]
    TooLarge(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl WadError {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        WadError::Corrupt(msg.into())
    }
}
