//! Chat log manager.

use std::fmt::Write;

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, info};

use localdrop_shared::constants::DEFAULT_TIMESTAMP_FORMAT;
use localdrop_shared::ChatMessage;
use localdrop_store::{codec, KvStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    timestamp_format: String,
}

impl ChatLog {
    pub fn new(messages: Vec<ChatMessage>, timestamp_format: impl Into<String>) -> Self {
        Self {
            messages,
            timestamp_format: timestamp_format.into(),
        }
    }

    pub fn load<S: KvStore + ?Sized>(store: &S, timestamp_format: impl Into<String>) -> Self {
        let messages = codec::load_chat_messages(store);
        debug!(count = messages.len(), "chat messages loaded");
        Self::new(messages, timestamp_format)
    }

    /// Oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append `"<profile_name>: <body>"` stamped with the current local time.
    ///
    /// Returns `Ok(None)` without touching anything when the body is blank.
    pub fn send<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        profile_name: &str,
        body: &str,
    ) -> Result<Option<ChatMessage>, StoreError> {
        self.send_at(store, profile_name, body, Local::now())
    }

    pub fn send_at<S, Tz>(
        &mut self,
        store: &mut S,
        profile_name: &str,
        body: &str,
        at: DateTime<Tz>,
    ) -> Result<Option<ChatMessage>, StoreError>
    where
        S: KvStore + ?Sized,
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let body = body.trim();
        if body.is_empty() {
            return Ok(None);
        }

        let timestamp = self.format_timestamp(&at);
        let message = ChatMessage::new(profile_name, body, timestamp);
        self.messages.push(message.clone());

        if let Err(e) = codec::save_chat_messages(store, &self.messages) {
            self.messages.pop();
            return Err(e);
        }

        info!(author = %profile_name, total = self.messages.len(), "Message sent");
        Ok(Some(message))
    }

    fn format_timestamp<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut out = String::new();
        if write!(out, "{}", at.format(&self.timestamp_format)).is_err() {
            out = at.format(DEFAULT_TIMESTAMP_FORMAT).to_string();
        }
        out
    }

    /// Rewrite the author prefix of every message written as `old_name`.
    ///
    /// A message matches when its text starts with `"<old_name>:"`; the first
    /// occurrence of that string is replaced with `"<new_name>:"`. The log is
    /// persisted even when nothing matched. Returns the number of rewritten
    /// messages.
    pub fn rename_author<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        old_name: &str,
        new_name: &str,
    ) -> Result<usize, StoreError> {
        let old_prefix = format!("{old_name}:");
        let new_prefix = format!("{new_name}:");

        let previous = self.messages.clone();
        let mut rewritten = 0usize;
        for message in &mut self.messages {
            if message.text.starts_with(&old_prefix) {
                message.text = message.text.replacen(&old_prefix, &new_prefix, 1);
                rewritten += 1;
            }
        }

        if let Err(e) = codec::save_chat_messages(store, &self.messages) {
            self.messages = previous;
            return Err(e);
        }

        info!(from = %old_name, to = %new_name, rewritten, "Chat author renamed");
        Ok(rewritten)
    }
}
