/// Application name
pub const APP_NAME: &str = "localdrop";

/// Maximum upload size in bytes (5 MiB)
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// MIME prefix that switches a file to data-URI storage
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Store key holding the serialized file collection
pub const KEY_FILES: &str = "files";

/// Store key holding the serialized chat log
pub const KEY_CHAT_MESSAGES: &str = "chatMessages";

/// Store key holding the plain-text profile name
pub const KEY_PROFILE_NAME: &str = "profileName";

/// Query parameter carrying the invite token
pub const INVITE_QUERY_PARAM: &str = "invite";

/// Invite token length in characters
pub const INVITE_TOKEN_LEN: usize = 10;

/// Units used by the human-readable size formatter (base 1024)
pub const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Default chrono format for chat timestamps
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
