//! File collection manager.
//!
//! Owns the uploaded records in insertion order. The display order is the
//! reverse (newest first); [`SearchHit::index`] always refers back to the
//! insertion position so callers never translate display positions by hand.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use thiserror::Error;
use tracing::{debug, info};

use localdrop_shared::constants::MAX_FILE_SIZE;
use localdrop_shared::content::encode_content;
use localdrop_shared::error::UploadError;
use localdrop_shared::FileRecord;
use localdrop_store::{codec, KvStore, StoreError};

#[derive(Error, Debug)]
pub enum FileError {
    #[error("No file at position {index} (collection has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Failed to persist files: {0}")]
    Store(#[from] StoreError),
}

/// Where the bytes of a pending upload come from.
#[derive(Clone)]
pub enum UploadSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

// Never dump file content into logs.
impl fmt::Debug for UploadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadSource::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            UploadSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
        }
    }
}

/// A file the user picked but whose content has not been read yet.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub last_modified_ms: i64,
    pub source: UploadSource,
}

impl PendingUpload {
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
        last_modified_ms: i64,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            last_modified_ms,
            source: UploadSource::Bytes(bytes),
        }
    }

    /// Describe a file on disk from its metadata only; content is read later.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let last_modified_ms = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default();

        Ok(Self {
            mime_type: guess_mime_type(path),
            name,
            size_bytes: metadata.len(),
            last_modified_ms,
            source: UploadSource::Path(path.to_path_buf()),
        })
    }

    /// Reject oversized files before anything is read.
    pub fn check_size(&self) -> Result<(), UploadError> {
        if self.size_bytes > MAX_FILE_SIZE {
            return Err(UploadError::FileTooLarge {
                size: self.size_bytes,
                max: MAX_FILE_SIZE,
            });
        }
        Ok(())
    }

    /// Read the content fully and build the record.
    ///
    /// The limit is checked again on the bytes actually read, since a file on
    /// disk may have grown after its metadata was taken.
    pub async fn read(self) -> Result<FileRecord, UploadError> {
        self.check_size()?;

        let bytes = match self.source {
            UploadSource::Bytes(bytes) => bytes,
            UploadSource::Path(path) => tokio::fs::read(&path).await?,
        };

        let size_bytes = bytes.len() as u64;
        if size_bytes > MAX_FILE_SIZE {
            return Err(UploadError::FileTooLarge {
                size: size_bytes,
                max: MAX_FILE_SIZE,
            });
        }

        debug!(file_name = %self.name, bytes = size_bytes, "file content read");

        Ok(FileRecord {
            content: encode_content(&bytes, &self.mime_type),
            name: self.name,
            size_bytes,
            mime_type: self.mime_type,
            last_modified_ms: self.last_modified_ms,
        })
    }
}

/// MIME type guessed from the file extension. Unknown extensions get an
/// empty type, which is treated as text.
pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or_default()
        .to_string()
}

/// One search result: the record and its insertion position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub index: usize,
    pub record: &'a FileRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCollection {
    records: Vec<FileRecord>,
}

impl FileCollection {
    pub fn new(records: Vec<FileRecord>) -> Self {
        Self { records }
    }

    pub fn load<S: KvStore + ?Sized>(store: &S) -> Self {
        let records = codec::load_files(store);
        debug!(count = records.len(), "files loaded");
        Self { records }
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&FileRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Size check, full read, then append. On any error the collection is
    /// left exactly as it was.
    ///
    /// For callers that can hold the store across the read. The event loop
    /// reads on a separate task instead and calls [`append`](Self::append)
    /// once the record comes back.
    pub async fn upload<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        pending: PendingUpload,
    ) -> Result<FileRecord, UploadError> {
        pending.check_size()?;
        let record = pending.read().await?;
        self.append(store, record.clone())
            .map_err(|e| UploadError::Store(e.to_string()))?;
        Ok(record)
    }

    /// Append a fully read record and persist.
    pub fn append<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        record: FileRecord,
    ) -> Result<(), StoreError> {
        let name = record.name.clone();
        let size = record.size_bytes;
        self.records.push(record);

        if let Err(e) = codec::save_files(store, &self.records) {
            self.records.pop();
            return Err(e);
        }

        info!(file_name = %name, size, total = self.records.len(), "File uploaded");
        Ok(())
    }

    /// Remove the record at insertion position `index` and persist.
    pub fn remove<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        index: usize,
    ) -> Result<FileRecord, FileError> {
        if index >= self.records.len() {
            return Err(FileError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }

        let removed = self.records.remove(index);
        if let Err(e) = codec::save_files(store, &self.records) {
            self.records.insert(index, removed);
            return Err(e.into());
        }

        info!(file_name = %removed.name, index, "File removed");
        Ok(removed)
    }

    /// Newest-first, case-insensitive substring match on the name.
    ///
    /// The keyword is trimmed; an empty keyword matches everything.
    pub fn search<'a>(&'a self, keyword: &str) -> impl Iterator<Item = SearchHit<'a>> + 'a {
        let needle = keyword.trim().to_lowercase();
        self.records
            .iter()
            .enumerate()
            .rev()
            .filter(move |(_, record)| record.name.to_lowercase().contains(&needle))
            .map(|(index, record)| SearchHit { index, record })
    }
}
