//! Entity codec: collections and the profile name to and from store values.
//!
//! Loads never fail. A missing key, an unreadable store or a value that is
//! not valid JSON all mean "no prior data". Saves overwrite the whole value
//! with a single `set` call.

use serde::de::DeserializeOwned;
use serde::Serialize;

use localdrop_shared::constants::{KEY_CHAT_MESSAGES, KEY_FILES, KEY_PROFILE_NAME};
use localdrop_shared::{ChatMessage, FileRecord};

use crate::error::Result;
use crate::kv::KvStore;

pub fn load_files<S: KvStore + ?Sized>(store: &S) -> Vec<FileRecord> {
    load_json(store, KEY_FILES)
}

pub fn save_files<S: KvStore + ?Sized>(store: &mut S, files: &[FileRecord]) -> Result<()> {
    save_json(store, KEY_FILES, files)
}

pub fn load_chat_messages<S: KvStore + ?Sized>(store: &S) -> Vec<ChatMessage> {
    load_json(store, KEY_CHAT_MESSAGES)
}

pub fn save_chat_messages<S: KvStore + ?Sized>(
    store: &mut S,
    messages: &[ChatMessage],
) -> Result<()> {
    save_json(store, KEY_CHAT_MESSAGES, messages)
}

/// The profile name is stored as a plain string, not JSON.
pub fn load_profile_name<S: KvStore + ?Sized>(store: &S) -> String {
    match store.get(KEY_PROFILE_NAME) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key = KEY_PROFILE_NAME, error = %e, "store read failed, using default");
            String::new()
        }
    }
}

pub fn save_profile_name<S: KvStore + ?Sized>(store: &mut S, name: &str) -> Result<()> {
    store.set(KEY_PROFILE_NAME, name)
}

fn load_json<S, T>(store: &S, key: &str) -> Vec<T>
where
    S: KvStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "store read failed, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Option<Vec<T>>>(&raw) {
        Ok(items) => items.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value is not valid, starting empty");
            Vec::new()
        }
    }
}

fn save_json<S, T>(store: &mut S, key: &str, items: &[T]) -> Result<()>
where
    S: KvStore + ?Sized,
    T: Serialize,
{
    let json = serde_json::to_string(items)?;
    store.set(key, &json)?;
    tracing::debug!(key, count = items.len(), bytes = json.len(), "collection saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use crate::Database;

    fn sample_files() -> Vec<FileRecord> {
        vec![
            FileRecord {
                name: "a.txt".into(),
                size_bytes: 3,
                mime_type: "text/plain".into(),
                last_modified_ms: 1,
                content: "abc".into(),
            },
            FileRecord {
                name: "pic.png".into(),
                size_bytes: 4,
                mime_type: "image/png".into(),
                last_modified_ms: 2,
                content: "data:image/png;base64,iVBORw==".into(),
            },
        ]
    }

    #[test]
    fn files_round_trip() {
        let mut store = MemoryStore::new();
        let files = sample_files();
        save_files(&mut store, &files).unwrap();
        assert_eq!(load_files(&store), files);
    }

    #[test]
    fn chat_round_trip_through_sqlite() {
        let mut db = Database::open_in_memory().unwrap();
        let messages = vec![
            ChatMessage::new("Nova", "hello", "2024-01-01 09:00:00".into()),
            ChatMessage::new("", "anonymous", "2024-01-01 09:01:00".into()),
        ];
        save_chat_messages(&mut db, &messages).unwrap();
        assert_eq!(load_chat_messages(&db), messages);
    }

    #[test]
    fn profile_name_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(load_profile_name(&store), "");
        save_profile_name(&mut store, "Nova").unwrap();
        assert_eq!(load_profile_name(&store), "Nova");
    }

    #[test]
    fn profile_name_is_plain_text() {
        let mut store = MemoryStore::new();
        save_profile_name(&mut store, "Nova").unwrap();
        assert_eq!(store.get(KEY_PROFILE_NAME).unwrap().as_deref(), Some("Nova"));
    }

    #[test]
    fn missing_or_corrupt_values_load_empty() {
        let mut store = MemoryStore::new();
        assert!(load_files(&store).is_empty());
        assert!(load_chat_messages(&store).is_empty());

        store.set(KEY_FILES, "{not json").unwrap();
        store.set(KEY_CHAT_MESSAGES, r#"{"message":"x"}"#).unwrap();
        assert!(load_files(&store).is_empty());
        assert!(load_chat_messages(&store).is_empty());

        store.set(KEY_FILES, "null").unwrap();
        assert!(load_files(&store).is_empty());
    }

    #[test]
    fn reads_collections_written_by_the_browser_widget() {
        let mut store = MemoryStore::new();
        store
            .set(
                KEY_FILES,
                r#"[{"name":"n.txt","size":2,"type":"","lastModified":1700000000000,"content":"hi"}]"#,
            )
            .unwrap();

        let files = load_files(&store);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "n.txt");
        assert_eq!(files[0].mime_type, "");
        assert_eq!(files[0].last_modified_ms, 1_700_000_000_000);
    }
}
