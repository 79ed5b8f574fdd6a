//! The seam between the event wiring and whatever draws the UI.
//!
//! Blocking dialogs (`alert`, `confirm`, `prompt`) return only once the user
//! has answered, matching the run-to-completion model of the event loop.

use std::path::PathBuf;

use localdrop_shared::error::{ClipboardError, DownloadError};

use crate::render::View;

pub trait Host {
    /// Replace the contents of `view.pane` with `view.rows`.
    fn present(&mut self, view: &View);

    /// Blocking notification.
    fn alert(&mut self, message: &str);

    /// Blocking yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    /// Blocking free-text question; `None` when dismissed.
    fn prompt(&mut self, message: &str) -> Option<String>;

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Save `bytes` under `file_name`; returns where it went.
    fn download(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError>;

    /// Prefill the profile name input.
    fn show_profile_name(&mut self, _name: &str) {}

    /// A user action has run to completion.
    fn action_finished(&mut self) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::*;
    use crate::render::Pane;

    /// Host double that records everything and answers from scripted queues.
    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub views: Vec<View>,
        pub alerts: Vec<String>,
        pub questions: Vec<String>,
        pub confirm_answers: VecDeque<bool>,
        pub prompt_answers: VecDeque<Option<String>>,
        pub clipboard: Vec<String>,
        pub clipboard_broken: bool,
        pub downloads: Vec<(String, Vec<u8>)>,
        pub profile_input: Option<String>,
        pub finished_actions: usize,
    }

    impl RecordingHost {
        pub fn last_view(&self, pane: Pane) -> Option<&View> {
            self.views.iter().rev().find(|v| v.pane == pane)
        }

        pub fn file_titles(&self) -> Vec<String> {
            self.last_view(Pane::Files)
                .map(|v| v.file_rows().map(|r| r.title.clone()).collect())
                .unwrap_or_default()
        }
    }

    impl Host for RecordingHost {
        fn present(&mut self, view: &View) {
            self.views.push(view.clone());
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn confirm(&mut self, message: &str) -> bool {
            self.questions.push(message.to_string());
            self.confirm_answers.pop_front().unwrap_or(false)
        }

        fn prompt(&mut self, message: &str) -> Option<String> {
            self.questions.push(message.to_string());
            self.prompt_answers.pop_front().flatten()
        }

        fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.clipboard_broken {
                return Err(ClipboardError::WriteFailed("no clipboard".into()));
            }
            self.clipboard.push(text.to_string());
            Ok(())
        }

        fn download(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError> {
            self.downloads.push((file_name.to_string(), bytes.to_vec()));
            Ok(PathBuf::from(file_name))
        }

        fn show_profile_name(&mut self, name: &str) {
            self.profile_input = Some(name.to_string());
        }

        fn action_finished(&mut self) {
            self.finished_actions += 1;
        }
    }
}
