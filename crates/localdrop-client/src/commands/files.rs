//! File upload, search, copy and context-menu actions.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use localdrop_shared::constants::MAX_FILE_SIZE;
use localdrop_shared::content::decode_data_uri;
use localdrop_shared::error::UploadError;
use localdrop_shared::size::format_file_size;
use localdrop_shared::FileRecord;
use localdrop_store::KvStore;

use crate::events::AppEvent;
use crate::files::PendingUpload;
use crate::host::Host;
use crate::render::render_files;
use crate::state::AppState;

pub const MSG_CONTENT_COPIED: &str = "Content copied to clipboard.";
pub const MSG_CONTENT_COPY_FAILED: &str = "Failed to copy content.";
pub const DOWNLOAD_PROMPT: &str =
    "Download this image? Type \"y\" to download.\nPress Enter to skip to deletion.";

pub fn too_large_message() -> String {
    format!(
        "This file exceeds the {} limit and cannot be uploaded.",
        format_file_size(MAX_FILE_SIZE)
    )
}

pub fn delete_question(file_name: &str) -> String {
    format!("Really delete {file_name}?")
}

/// Start an upload. Oversized files are refused on the spot; otherwise the
/// content is read on a separate task and handed back as
/// [`AppEvent::UploadRead`]. Returns whether a read was started.
pub fn submit_file<H: Host>(
    host: &mut H,
    events: &UnboundedSender<AppEvent>,
    pending: PendingUpload,
) -> bool {
    if let Err(e) = pending.check_size() {
        warn!(file_name = %pending.name, error = %e, "Upload rejected");
        host.alert(&too_large_message());
        return false;
    }

    let tx = events.clone();
    let file_name = pending.name.clone();
    debug!(file_name = %file_name, size = pending.size_bytes, "reading upload");

    tokio::spawn(async move {
        let result = pending.read().await;
        if tx.send(AppEvent::UploadRead { file_name, result }).is_err() {
            warn!("event loop gone before upload finished");
        }
    });
    true
}

/// Apply a finished content read.
pub fn finish_upload<S: KvStore, H: Host>(
    state: &mut AppState<S>,
    host: &mut H,
    file_name: &str,
    result: Result<FileRecord, UploadError>,
) {
    let record = match result {
        Ok(record) => record,
        Err(UploadError::FileTooLarge { .. }) => {
            host.alert(&too_large_message());
            return;
        }
        Err(e) => {
            warn!(file_name, error = %e, "Upload failed");
            host.alert(&format!("Failed to upload {file_name}: {e}"));
            return;
        }
    };

    if let Err(e) = state.files.append(&mut state.store, record) {
        warn!(file_name, error = %e, "Upload not saved");
        host.alert(&format!("Failed to save {file_name}: {e}"));
        return;
    }

    refresh_files(state, host);
}

pub fn search_input<S: KvStore, H: Host>(state: &mut AppState<S>, host: &mut H, keyword: String) {
    state.search_keyword = keyword;
    refresh_files(state, host);
}

pub fn search_submit<S: KvStore, H: Host>(state: &mut AppState<S>, host: &mut H) {
    refresh_files(state, host);
}

pub fn refresh_files<S: KvStore, H: Host>(state: &AppState<S>, host: &mut H) {
    host.present(&render_files(&state.files, &state.search_keyword));
}

/// Insertion index of the record drawn at display position `row`.
fn resolve_row<S: KvStore>(state: &AppState<S>, row: usize) -> Option<usize> {
    state
        .files
        .search(&state.search_keyword)
        .nth(row)
        .map(|hit| hit.index)
}

pub fn copy_content<S: KvStore, H: Host>(state: &mut AppState<S>, host: &mut H, row: usize) {
    let Some(record) = resolve_row(state, row).and_then(|i| state.files.get(i)) else {
        debug!(row, "copy on a row that is not displayed");
        return;
    };

    if record.is_image() {
        debug!(file_name = %record.name, "images have no copyable content");
        return;
    }

    match host.write_clipboard(&record.content) {
        Ok(()) => host.alert(MSG_CONTENT_COPIED),
        Err(e) => {
            warn!(file_name = %record.name, error = %e, "Copy failed");
            host.alert(MSG_CONTENT_COPY_FAILED);
        }
    }
}

/// Context-menu flow: images first offer a download, then every row asks
/// before deleting.
pub fn secondary_activate<S: KvStore, H: Host>(state: &mut AppState<S>, host: &mut H, row: usize) {
    let Some(index) = resolve_row(state, row) else {
        debug!(row, "context menu on a row that is not displayed");
        return;
    };
    let Some(record) = state.files.get(index).cloned() else {
        return;
    };

    if record.is_image() {
        let wants_download = host
            .prompt(DOWNLOAD_PROMPT)
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y"));
        if wants_download {
            download_image(host, &record);
        }
    }

    if !host.confirm(&delete_question(&record.name)) {
        return;
    }

    match state.files.remove(&mut state.store, index) {
        Ok(_) => refresh_files(state, host),
        Err(e) => {
            warn!(file_name = %record.name, error = %e, "Delete failed");
            host.alert(&format!("Failed to delete {}: {e}", record.name));
        }
    }
}

fn download_image<H: Host>(host: &mut H, record: &FileRecord) {
    let saved = decode_data_uri(&record.content).and_then(|bytes| host.download(&record.name, &bytes));
    match saved {
        Ok(path) => info!(file_name = %record.name, path = %path.display(), "Image downloaded"),
        Err(e) => {
            warn!(file_name = %record.name, error = %e, "Download failed");
            host.alert(&format!("Failed to download {}: {e}", record.name));
        }
    }
}
