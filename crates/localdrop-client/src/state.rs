//! Application state owned by the event loop.
//!
//! Exactly one task holds an [`AppState`]; every mutation goes through it.
//! Independent instances never share anything, which keeps tests isolated.

use localdrop_store::{codec, KvStore};

use crate::chat::ChatLog;
use crate::config::ClientConfig;
use crate::files::FileCollection;

pub struct AppState<S: KvStore> {
    /// Persistent key/value store backing every collection.
    pub store: S,

    /// Uploaded files, insertion order.
    pub files: FileCollection,

    /// Chat log, insertion order.
    pub chat: ChatLog,

    /// Name prefixed to outgoing chat messages. Empty until saved.
    pub profile_name: String,

    /// Current contents of the search input.
    pub search_keyword: String,
}

impl<S: KvStore> AppState<S> {
    /// Restore everything from `store`; missing or unreadable data starts empty.
    pub fn load(store: S, config: &ClientConfig) -> Self {
        let files = FileCollection::load(&store);
        let chat = ChatLog::load(&store, config.timestamp_format.clone());
        let profile_name = codec::load_profile_name(&store);

        tracing::info!(
            files = files.len(),
            messages = chat.len(),
            has_profile = !profile_name.is_empty(),
            "state restored"
        );

        Self {
            store,
            files,
            chat,
            profile_name,
            search_keyword: String::new(),
        }
    }
}
