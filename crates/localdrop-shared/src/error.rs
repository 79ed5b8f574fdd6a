use thiserror::Error;

/// Failure of a single upload action. Nothing is added to the collection.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("File too large: {size} bytes (max {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to persist files: {0}")]
    Store(String),
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Content is not a base64 data URI")]
    NotDataUri,

    #[error("Base64 decode error")]
    Base64Decode,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
