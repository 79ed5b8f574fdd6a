use serde::{Deserialize, Serialize};

use crate::constants::IMAGE_MIME_PREFIX;

/// An uploaded file with its content held inline.
///
/// The serialized field names match the layout the widget has always written
/// under the `files` key, so stored collections stay readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    /// Original file name.
    pub name: String,
    /// Size in bytes as reported at upload time.
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// MIME type as reported at upload time (may be empty).
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Last-modified time of the source file, epoch milliseconds.
    #[serde(rename = "lastModified")]
    pub last_modified_ms: i64,
    /// Text content, or a `data:` URI for images.
    pub content: String,
}

impl FileRecord {
    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }
}

pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with(IMAGE_MIME_PREFIX)
}

/// One chat log entry. The author name is baked into the text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// `"<profile name>: <body>"`
    #[serde(rename = "message")]
    pub text: String,
    /// Creation time, already formatted for display.
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(author: &str, body: &str, timestamp: String) -> Self {
        Self {
            text: format!("{author}: {body}"),
            timestamp,
        }
    }
}
