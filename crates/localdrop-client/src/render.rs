//! Pure projections of collection state into display lists.
//!
//! Nothing here mutates state. Running a projection twice on the same input
//! yields an identical [`View`].

use serde::Serialize;

use localdrop_shared::size::format_file_size;

use crate::chat::ChatLog;
use crate::files::FileCollection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Pane {
    Files,
    Chat,
}

/// A full redraw of one pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub pane: Pane,
    pub rows: Vec<DisplayRow>,
    /// Row the host should scroll into view after drawing.
    pub scroll_to: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DisplayRow {
    File(FileRow),
    Chat(ChatLine),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRow {
    /// Insertion position of the record in the file collection.
    pub index: usize,
    /// `"<name> (<size>)"`
    pub title: String,
    pub body: FileBody,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum FileBody {
    Text { content: String },
    Image {
        #[serde(rename = "dataUri")]
        data_uri: String,
    },
}

/// Interactions a row offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RowAction {
    /// Copy the text content to the clipboard.
    CopyContent,
    /// Secondary activation: offer to save the image.
    Download,
    /// Secondary activation: confirm and delete.
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatLine {
    /// `"[<timestamp>] <text>"`
    pub text: String,
}

impl View {
    pub fn file_rows(&self) -> impl Iterator<Item = &FileRow> {
        self.rows.iter().filter_map(|row| match row {
            DisplayRow::File(file) => Some(file),
            DisplayRow::Chat(_) => None,
        })
    }
}

/// Files matching `keyword`, newest first.
pub fn render_files(files: &FileCollection, keyword: &str) -> View {
    let rows = files
        .search(keyword)
        .map(|hit| {
            let record = hit.record;
            let (body, actions) = if record.is_image() {
                (
                    FileBody::Image {
                        data_uri: record.content.clone(),
                    },
                    vec![RowAction::Download, RowAction::Delete],
                )
            } else {
                (
                    FileBody::Text {
                        content: record.content.clone(),
                    },
                    vec![RowAction::CopyContent, RowAction::Delete],
                )
            };

            DisplayRow::File(FileRow {
                index: hit.index,
                title: format!("{} ({})", record.name, format_file_size(record.size_bytes)),
                body,
                actions,
            })
        })
        .collect();

    View {
        pane: Pane::Files,
        rows,
        scroll_to: None,
    }
}

/// Every message, oldest first, scrolled to the latest.
pub fn render_chat(chat: &ChatLog) -> View {
    let rows: Vec<DisplayRow> = chat
        .messages()
        .iter()
        .map(|message| {
            DisplayRow::Chat(ChatLine {
                text: format!("[{}] {}", message.timestamp, message.text),
            })
        })
        .collect();

    View {
        pane: Pane::Chat,
        scroll_to: rows.len().checked_sub(1),
        rows,
    }
}
