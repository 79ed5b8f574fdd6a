use localdrop_shared::error::UploadError;
use localdrop_shared::FileRecord;

use crate::files::PendingUpload;
use crate::render::Pane;

/// A discrete user action.
///
/// `row` values are display positions in the file pane as last presented.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Page load: prefill the profile input and draw both panes.
    Load,
    SubmitFile(PendingUpload),
    /// Live search: the input changed.
    SearchInput(String),
    /// Explicit search submit with the current input.
    SearchSubmit,
    SendChat(String),
    SaveProfileName(String),
    CreateInvite,
    CopyContent { row: usize },
    /// Context-menu style activation on a file row.
    SecondaryActivate { row: usize },
    Redraw(Pane),
}

/// Everything the state-owning loop consumes.
#[derive(Debug)]
pub enum AppEvent {
    Ui(UiEvent),
    /// A spawned content read finished.
    UploadRead {
        file_name: String,
        result: Result<FileRecord, UploadError>,
    },
    Shutdown,
}

impl From<UiEvent> for AppEvent {
    fn from(event: UiEvent) -> Self {
        AppEvent::Ui(event)
    }
}
